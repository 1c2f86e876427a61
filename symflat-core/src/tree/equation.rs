use super::Expression;

/// An expression, optionally equated to a second expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Equation {
    pub lhs: Expression,
    pub rhs: Option<Expression>,
}

impl Equation {
    /// Creates the equation `lhs = rhs`.
    pub fn new(lhs: Expression, rhs: Expression) -> Self {
        Self { lhs, rhs: Some(rhs) }
    }

    /// Creates an equation without a right-hand side.
    pub fn expression(lhs: Expression) -> Self {
        Self { lhs, rhs: None }
    }

    /// Returns true if there is no right-hand side.
    pub fn is_expression(&self) -> bool {
        self.rhs.is_none()
    }

    /// Returns the expression if there is no right-hand side.
    pub fn as_expression(&self) -> Option<&Expression> {
        match self.rhs {
            Some(_) => None,
            None => Some(&self.lhs),
        }
    }

    pub fn into_expression(self) -> Option<Expression> {
        match self.rhs {
            Some(_) => None,
            None => Some(self.lhs),
        }
    }
}

impl From<Expression> for Equation {
    fn from(lhs: Expression) -> Self {
        Self::expression(lhs)
    }
}
