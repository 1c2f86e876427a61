//! Statement batches run against a persistent evaluation state.
//!
//! A [`Session`] owns the configuration, the variables and both function tables. Source code is
//! submitted as a batch of statements separated by newlines or `;`; every statement runs on its
//! own, so one bad statement never stops the ones after it.
//!
//! Only one submission may run at a time. A second submission made while one is in flight fails
//! with [`Busy`] instead of waiting.

use crate::{
    command::Command,
    config::EvalConfig,
    error::{
        kind::{Busy, DuplicateParameter, ReservedWord},
        Error,
        ExecutionError,
    },
    flatten::{Output, OutputSink, Toolset},
    number::RoundingMode,
    table::{FunctionTable, LookupTable, UserFunction},
    tree::{Equation, Expression, Factor},
};
use ariadne::Report;
use log::{debug, info};
use std::{
    collections::HashSet,
    fmt,
    io,
    ops::Range,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
        Mutex,
        PoisonError,
    },
    thread::{self, JoinHandle},
};
use symflat_error::ErrorKind;
use symflat_parser::parser::{ast, Parser};

/// The stack size of the worker thread used by [`Session::spawn_submit`]. Flattening is
/// recursive, and the recursion guard allows deep nesting.
pub const WORKER_STACK_SIZE: usize = 32 * 1024 * 1024;

/// Why a statement produced no result.
#[derive(Debug)]
pub enum StatementError {
    /// The statement could not be read.
    Parse(symflat_error::Error),

    /// The statement was read, but evaluating it failed.
    Eval(Error),
}

impl StatementError {
    pub fn message(&self) -> String {
        match self {
            StatementError::Parse(err) => err.message(),
            StatementError::Eval(err) => err.message(),
        }
    }

    /// Builds a report for the error. Evaluation errors carry no spans of their own, so they are
    /// attached to the span of the whole statement.
    pub fn build_report<'a>(
        &self,
        src_id: &'a str,
        statement: Range<usize>,
    ) -> Report<(&'a str, Range<usize>)> {
        match self {
            StatementError::Parse(err) => err.build_report(src_id),
            StatementError::Eval(err) => err.build_report(src_id, &[statement]),
        }
    }
}

impl fmt::Display for StatementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for StatementError {}

impl From<symflat_error::Error> for StatementError {
    fn from(err: symflat_error::Error) -> Self {
        StatementError::Parse(err)
    }
}

impl From<Error> for StatementError {
    fn from(err: Error) -> Self {
        StatementError::Eval(err)
    }
}

impl From<ExecutionError> for StatementError {
    fn from(err: ExecutionError) -> Self {
        StatementError::Eval(err.into())
    }
}

/// The outcome of a single statement.
#[derive(Debug)]
pub struct StatementOutcome {
    /// The region of the source code the statement was read from.
    pub span: Range<usize>,

    /// Side-channel output produced while the statement ran, in order.
    pub outputs: Vec<Output>,

    /// The flattened value of the statement. Definitions, and calls that only produce
    /// side-channel output, have no value.
    pub result: Result<Option<Equation>, StatementError>,
}

/// A submission could not be started.
#[derive(Debug)]
pub enum SubmitError {
    /// Another submission is in flight.
    Busy(Busy),

    /// The worker thread could not be started.
    Spawn(io::Error),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::Busy(err) => write!(f, "{}", err.message()),
            SubmitError::Spawn(err) => write!(f, "failed to start the evaluation thread: {}", err),
        }
    }
}

impl std::error::Error for SubmitError {}

impl From<Busy> for SubmitError {
    fn from(err: Busy) -> Self {
        SubmitError::Busy(err)
    }
}

/// Marks a submission as in flight until dropped.
struct FlightGuard {
    flag: Arc<AtomicBool>,
}

impl FlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Result<Self, Busy> {
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map_err(|_| Busy)?;
        Ok(Self { flag: Arc::clone(flag) })
    }
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// The state that statements read and write.
#[derive(Debug)]
struct State {
    config: EvalConfig,
    symbols: LookupTable,
    functions: FunctionTable<UserFunction>,
    builtins: FunctionTable<Arc<dyn Command>>,
}

/// Returns the name being assigned to, if the left-hand side of an equation is a single,
/// non-negated symbol.
fn assignment_target(lhs: &Expression) -> Option<&str> {
    match lhs.as_single() {
        Some(single) if !single.negated => single.factor.as_symbol().map(String::as_str),
        _ => None,
    }
}

/// Returns the call if the expression is a single, non-negated function call.
fn single_call(expr: &Expression) -> Option<&Factor> {
    match expr.as_single() {
        Some(single) if !single.negated && matches!(single.factor, Factor::Function(_)) => {
            Some(single.factor)
        },
        _ => None,
    }
}

impl State {
    fn new(config: EvalConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            config,
            symbols: LookupTable::with_constants(&constants_context(&config))?,
            functions: FunctionTable::new(),
            builtins: FunctionTable::builtins(),
        })
    }

    fn toolset<'a>(&'a self, sink: &'a mut dyn OutputSink) -> Toolset<'a> {
        Toolset::new(
            self.config.context(),
            self.config.format_options(),
            &self.symbols,
            &self.functions,
            &self.builtins,
            sink,
        )
    }

    /// Runs every statement in the source.
    fn run(&mut self, source: &str) -> Vec<StatementOutcome> {
        Parser::new(source)
            .try_parse_each()
            .into_iter()
            .map(|stmt| match stmt {
                Ok(stmt) => {
                    let mut outputs = Vec::new();
                    let result = self.execute(&stmt, &mut outputs);
                    if let Err(err) = &result {
                        debug!("statement at {:?} failed: {}", stmt.span(), err);
                    }
                    StatementOutcome { span: stmt.span(), outputs, result }
                },
                Err(err) => StatementOutcome {
                    span: err.spans.first().cloned().unwrap_or(0..source.len()),
                    outputs: Vec::new(),
                    result: Err(StatementError::Parse(err)),
                },
            })
            .collect()
    }

    fn execute(&mut self, stmt: &ast::Stmt, outputs: &mut Vec<Output>) -> Result<Option<Equation>, StatementError> {
        match stmt {
            ast::Stmt::Define(header, body) => {
                self.define(header, body)?;
                Ok(None)
            },
            ast::Stmt::Equation(equation) => self.evaluate(Equation::try_from(equation)?, outputs),
        }
    }

    /// Stores a user function. The body is kept as written.
    fn define(&mut self, header: &ast::FuncHeader, body: &ast::Equation) -> Result<(), StatementError> {
        let name = header.name.name.as_str();
        if self.builtins.contains(name) || self.symbols.is_reserved(name) {
            return Err(ExecutionError::from(ReservedWord { name: name.to_string() }).into());
        }

        let mut seen = HashSet::new();
        for param in &header.params {
            if !seen.insert(param.name.as_str()) {
                return Err(ExecutionError::from(DuplicateParameter { name: param.name.clone() }).into());
            }
        }

        let params = header.params.iter().map(|param| param.name.clone()).collect::<Vec<_>>();
        let body = Equation::try_from(body)?;
        info!("defined `{}[{}]` := {}", name, params.join(", "), body);
        self.functions.insert(name, UserFunction::new(params, body));
        Ok(())
    }

    fn evaluate(&mut self, equation: Equation, outputs: &mut Vec<Output>) -> Result<Option<Equation>, StatementError> {
        if let (Some(target), Some(rhs)) = (assignment_target(&equation.lhs), &equation.rhs) {
            let value = self.toolset(outputs).flatten_expression(rhs)?;
            self.symbols.assign(target, value.clone())?;
            info!("assigned `{}` = {}", target, value);
            return Ok(Some(Equation::expression(value)));
        }

        let mut toolset = self.toolset(outputs);
        if equation.rhs.is_none() {
            if let Some(call) = single_call(&equation.lhs) {
                return Ok(toolset
                    .flatten_factor(call)?
                    .map(|factor| Equation::expression(factor.into_expression())));
            }
        }
        Ok(Some(toolset.flatten_equation(&equation)?))
    }

    fn set_config(&mut self, config: EvalConfig) -> Result<(), Error> {
        config.validate()?;
        if constants_context(&config) != constants_context(&self.config) {
            let constants = LookupTable::with_constants(&constants_context(&config))?;
            for (name, value) in constants.iter() {
                self.symbols.reserve(name, value.clone());
            }
        }
        self.config = config;
        Ok(())
    }
}

/// The context the constants are computed in. Constants like π can never be represented exactly,
/// so they are rounded half to even when rounding is otherwise disallowed.
fn constants_context(config: &EvalConfig) -> crate::number::Context {
    let mut ctx = config.context();
    if ctx.rounding == RoundingMode::Unnecessary {
        ctx.rounding = RoundingMode::HalfEven;
    }
    ctx
}

/// A persistent evaluation state that accepts one submission at a time.
#[derive(Debug)]
pub struct Session {
    state: Mutex<State>,
    in_flight: Arc<AtomicBool>,
}

impl Session {
    /// Creates a session with the given configuration, no variables and no user functions.
    pub fn new(config: EvalConfig) -> Result<Self, Error> {
        Ok(Self {
            state: Mutex::new(State::new(config)?),
            in_flight: Arc::new(AtomicBool::new(false)),
        })
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut State) -> T) -> T {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    /// Runs every statement in the source on the calling thread.
    ///
    /// A statement that recurses until the guard stops it nests a few hundred flatten calls, which
    /// fits the default stack of a spawned thread. Callers with a smaller stack should use
    /// [`Session::spawn_submit`], whose worker has [`WORKER_STACK_SIZE`] bytes.
    pub fn submit(&self, source: &str) -> Result<Vec<StatementOutcome>, Busy> {
        let _guard = FlightGuard::acquire(&self.in_flight)?;
        Ok(self.with_state(|state| state.run(source)))
    }

    /// Runs every statement in the source on a worker thread. The session counts as busy until
    /// the worker finishes.
    pub fn spawn_submit(self: &Arc<Self>, source: String) -> Result<JoinHandle<Vec<StatementOutcome>>, SubmitError> {
        let guard = FlightGuard::acquire(&self.in_flight)?;
        let session = Arc::clone(self);
        thread::Builder::new()
            .name("symflat-eval".to_string())
            .stack_size(WORKER_STACK_SIZE)
            .spawn(move || {
                let _guard = guard;
                session.with_state(|state| state.run(&source))
            })
            .map_err(SubmitError::Spawn)
    }

    /// Returns true if a submission is running.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn config(&self) -> EvalConfig {
        self.with_state(|state| state.config)
    }

    /// Replaces the configuration. The constants are recomputed if the precision changed.
    pub fn set_config(&self, config: EvalConfig) -> Result<(), Error> {
        self.with_state(|state| state.set_config(config))
    }

    /// The variables that were assigned, sorted by name.
    pub fn variables(&self) -> Vec<(String, Expression)> {
        self.with_state(|state| {
            state.symbols
                .names()
                .into_iter()
                .filter_map(|name| state.symbols.get(name).map(|value| (name.to_string(), value.clone())))
                .collect()
        })
    }

    /// The names of the user-defined functions, sorted.
    pub fn function_names(&self) -> Vec<String> {
        self.with_state(|state| state.functions.names().into_iter().map(str::to_string).collect())
    }

    /// The names of the built-in commands, sorted.
    pub fn builtin_names(&self) -> Vec<String> {
        self.with_state(|state| state.builtins.names().into_iter().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::*;
    use crate::{
        error::kind::RecursionLimitExceeded,
        flatten::MAX_RECURSION_DEPTH,
        number::Number,
    };
    use pretty_assertions::assert_eq;
    use super::*;

    fn session() -> Session {
        Session::new(EvalConfig::default()).unwrap()
    }

    /// Runs the source and returns each statement's result as text.
    fn results(session: &Session, source: &str) -> Vec<Result<Option<String>, String>> {
        session.submit(source)
            .unwrap()
            .into_iter()
            .map(|outcome| match outcome.result {
                Ok(value) => Ok(value.map(|value| value.to_string())),
                Err(err) => Err(err.message()),
            })
            .collect()
    }

    fn number(session: &Session, source: &str) -> Number {
        let mut outcomes = session.submit(source).unwrap();
        let outcome = outcomes.pop().unwrap();
        let equation = outcome.result.unwrap().unwrap();
        equation.lhs.as_number().cloned().unwrap()
    }

    #[test]
    fn variable_retainment() {
        let session = session();
        assert_eq!(results(&session, "x = 2"), vec![Ok(Some("2".to_string()))]);
        for _ in 0..5 {
            assert_eq!(number(&session, "x"), Number::from(2));
        }
        assert_eq!(results(&session, "x^2 + y"), vec![Ok(Some("4 + y".to_string()))]);
        assert_eq!(session.variables(), vec![("x".to_string(), Expression::number(Number::from(2)))]);
    }

    #[test]
    fn pythagorean_identity() {
        let session = session();
        session.submit("x = 0.7").unwrap();
        let value = number(&session, "Sin[x]^2 + Cos[x]^2").to_f64().unwrap();
        assert_float_absolute_eq!(value, 1.0, 1e-14);
    }

    #[test]
    fn user_functions() {
        let session = session();
        let results = results(&session, "f[x, y] := x^2 - y; f[3, 1]; f[y, x]; f[1]");
        assert_eq!(results[0], Ok(None));
        assert_eq!(results[1], Ok(Some("8".to_string())));
        assert_eq!(results[2], Ok(Some("y^2 - x".to_string())));
        assert_eq!(results[3], Err("`f` takes 2 argument(s), but 1 were given".to_string()));
        assert_eq!(session.function_names(), vec!["f".to_string()]);
    }

    #[test]
    fn recursive_definition_hits_the_guard() {
        let session = Arc::new(session());
        session.submit("f[x] := f[x] + 1").unwrap();

        let outcomes = session.spawn_submit("f[2]".to_string()).unwrap().join().unwrap();
        let Err(StatementError::Eval(err)) = &outcomes[0].result else {
            panic!("expected an evaluation error, got {:?}", outcomes[0].result);
        };
        assert_eq!(*err, Error::RecursionLimitExceeded(RecursionLimitExceeded { limit: MAX_RECURSION_DEPTH }));
    }

    #[test]
    fn recursion_guard_on_the_calling_thread() {
        let session = session();
        let outcomes = session.submit("f[x] := f[x] + 1; g[x] := x * g[x - 1]; f[2]; g[3]; 1 + 1").unwrap();
        for outcome in &outcomes[2..4] {
            let Err(StatementError::Eval(err)) = &outcome.result else {
                panic!("expected an evaluation error, got {:?}", outcome.result);
            };
            assert!(err.is_fatal());
            assert_eq!(*err, Error::RecursionLimitExceeded(RecursionLimitExceeded { limit: MAX_RECURSION_DEPTH }));
        }

        // the session is usable afterwards
        assert_eq!(outcomes[4].result.as_ref().unwrap().as_ref().unwrap().to_string(), "2");
        assert_eq!(number(&session, "3 * 4"), Number::from(12));
    }

    #[test]
    fn statements_fail_independently() {
        let session = session();
        let results = results(&session, "1/0\n2 +* 3\nPi = 3\nSin := 2\n3 + 4");
        assert_eq!(results.len(), 5);
        assert_eq!(results[0], Err("division by zero".to_string()));
        assert!(results[1].is_err());
        assert_eq!(results[2], Err("`Pi` is a reserved name".to_string()));
        assert!(results[3].is_err());
        assert_eq!(results[4], Ok(Some("7".to_string())));
    }

    #[test]
    fn builtins_cannot_be_redefined() {
        let session = session();
        let results = results(&session, "Sin[x] := x; g[a, a] := a");
        assert_eq!(results[0], Err("`Sin` is a reserved name".to_string()));
        assert_eq!(results[1], Err("the parameter `a` is declared more than once".to_string()));
    }

    #[test]
    fn print_has_no_value() {
        let session = session();
        let outcomes = session.submit("Print[\"hello\", 1/4]").unwrap();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].outputs, vec![Output::Text("hello 0.25".to_string())]);
        assert!(matches!(outcomes[0].result, Ok(None)));
    }

    #[test]
    fn equations_are_flattened_on_both_sides() {
        let session = session();
        assert_eq!(results(&session, "2x + x = 3 * 4"), vec![Ok(Some("3x = 12".to_string()))]);
    }

    #[test]
    fn busy_while_in_flight() {
        let session = session();
        let _guard = FlightGuard::acquire(&session.in_flight).unwrap();
        assert!(session.is_busy());
        assert!(session.submit("1").is_err());
    }

    #[test]
    fn precision_changes_apply() {
        let session = session();
        session.set_config(EvalConfig { precision: 5, ..Default::default() }).unwrap();
        assert_eq!(number(&session, "1/3"), "0.33333".parse::<Number>().unwrap());
        assert_eq!(number(&session, "Pi"), "3.1416".parse::<Number>().unwrap());
        assert!(session.set_config(EvalConfig { precision: 0, ..Default::default() }).is_err());
    }
}
