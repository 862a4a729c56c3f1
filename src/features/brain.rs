use std::collections::HashMap;
use std::f64::consts::{E, PI};

/// One recorded unit of user input.
#[derive(Debug, Clone, PartialEq)]
pub enum LogEntry {
    Number(f64),
    Variable(String),
    Symbol(String),
}

/// What a keypad symbol means when the log is replayed.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    Constant(f64),
    Unary(fn(f64) -> f64),
    Binary(fn(f64, f64) -> f64),
    Equals,
    Clear,
    Undo,
}

pub fn operation_for(symbol: &str) -> Option<Operation> {
    let operation = match symbol {
        "π" => Operation::Constant(PI),
        "e" => Operation::Constant(E),
        "√" => Operation::Unary(f64::sqrt),
        "cos" => Operation::Unary(f64::cos),
        "sin" => Operation::Unary(f64::sin),
        "±" => Operation::Unary(|x| -x),
        "x⁻¹" => Operation::Unary(|x| x.powi(-1)),
        "x⁻²" => Operation::Unary(|x| x.powi(-2)),
        "x²" => Operation::Unary(|x| x.powi(2)),
        "x³" => Operation::Unary(|x| x.powi(3)),
        "×" => Operation::Binary(|a, b| a * b),
        "÷" => Operation::Binary(|a, b| a / b),
        "+" => Operation::Binary(|a, b| a + b),
        // The keypad label is U+2212; plain ASCII minus is accepted too.
        "−" | "-" => Operation::Binary(|a, b| a - b),
        "=" => Operation::Equals,
        "C" => Operation::Clear,
        "←" => Operation::Undo,
        _ => return None,
    };
    Some(operation)
}

/// Textual form of a unary application. The power-style keys wrap the operand
/// instead of prefixing it.
pub fn unary_description(symbol: &str, inner: &str) -> String {
    match symbol {
        "x⁻¹" => format!("({inner})⁻¹"),
        "x⁻²" => format!("({inner})⁻²"),
        "x²" => format!("({inner})²"),
        "x³" => format!("({inner})³"),
        _ => format!("{symbol} ({inner}) "),
    }
}

/// Append-only record of everything the user has entered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationLog {
    entries: Vec<LogEntry>,
}

impl OperationLog {
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn push_number(&mut self, value: f64) {
        self.entries.push(LogEntry::Number(value));
    }

    pub fn push_variable(&mut self, name: &str) {
        self.entries.push(LogEntry::Variable(name.to_string()));
    }

    // Unknown tokens are legal here; replay skips anything the operator
    // table does not recognize.
    pub fn push_symbol(&mut self, symbol: &str) {
        self.entries.push(LogEntry::Symbol(symbol.to_string()));
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn remove_last(&mut self) -> Result<LogEntry, String> {
        self.entries.pop().ok_or_else(|| "empty_log".to_string())
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of replaying a log: the current value (if any operand was entered),
/// whether a binary operation is still waiting for its second operand, and
/// the expression entered so far.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub result: Option<f64>,
    pub is_pending: bool,
    pub description: String,
}

/// Recording front end over an [`OperationLog`]. All numeric state is derived
/// by [`evaluate`]; nothing but the log is stored between calls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalculatorBrain {
    log: OperationLog,
}

impl CalculatorBrain {
    pub const fn new() -> Self {
        Self { log: OperationLog::new() }
    }

    pub fn record_number(&mut self, value: f64) {
        self.log.push_number(value);
    }

    pub fn record_variable(&mut self, name: &str) {
        self.log.push_variable(name);
    }

    /// Clear and undo act on the log immediately; every other token, known
    /// or not, is appended and interpreted at replay time.
    pub fn record_symbol(&mut self, symbol: &str) -> Result<(), String> {
        match operation_for(symbol) {
            Some(Operation::Clear) => {
                self.log.reset();
                Ok(())
            }
            Some(Operation::Undo) => self.log.remove_last().map(|_| ()),
            _ => {
                self.log.push_symbol(symbol);
                Ok(())
            }
        }
    }

    pub fn evaluate(&self, variables: Option<&HashMap<String, f64>>) -> Evaluation {
        evaluate(&self.log, variables)
    }

    pub fn log(&self) -> &OperationLog {
        &self.log
    }
}

#[derive(Debug, Clone)]
struct Accumulator {
    value: f64,
    text: String,
}

#[derive(Debug, Clone, Copy)]
struct PendingBinary {
    function: fn(f64, f64) -> f64,
    first_operand: f64,
}

impl PendingBinary {
    fn perform(&self, second_operand: f64) -> f64 {
        (self.function)(self.first_operand, second_operand)
    }
}

/// Replay the whole log against an optional binding table. Pure: the same log
/// and bindings always produce the same triple, and the log is never touched.
pub fn evaluate(log: &OperationLog, variables: Option<&HashMap<String, f64>>) -> Evaluation {
    let mut accumulator: Option<Accumulator> = None;
    let mut pending: Option<PendingBinary> = None;
    // Snapshot of the chain taken when a binary operation was latched;
    // carries the most complete description while an operation is pending.
    let mut resolved: Option<Accumulator> = None;

    for entry in log.entries() {
        match entry {
            LogEntry::Number(value) => {
                accumulator = Some(Accumulator {
                    value: *value,
                    text: format_operand(*value),
                });
            }
            LogEntry::Variable(name) => {
                let value = variables
                    .and_then(|bindings| bindings.get(name))
                    .copied()
                    .unwrap_or(0.0);
                accumulator = Some(Accumulator { value, text: name.clone() });
            }
            LogEntry::Symbol(symbol) => {
                apply_symbol(symbol, &mut accumulator, &mut pending, &mut resolved);
            }
        }
    }

    Evaluation {
        result: accumulator.as_ref().map(|current| current.value),
        is_pending: pending.is_some(),
        description: resolved
            .or(accumulator)
            .map(|current| current.text)
            .unwrap_or_default(),
    }
}

fn apply_symbol(
    symbol: &str,
    accumulator: &mut Option<Accumulator>,
    pending: &mut Option<PendingBinary>,
    resolved: &mut Option<Accumulator>,
) {
    let Some(operation) = operation_for(symbol) else {
        return;
    };
    match operation {
        Operation::Constant(value) => {
            *accumulator = Some(Accumulator {
                value,
                text: symbol.to_string(),
            });
        }
        Operation::Unary(function) => {
            if let Some(current) = accumulator.take() {
                *accumulator = Some(Accumulator {
                    value: function(current.value),
                    text: unary_description(symbol, &current.text),
                });
            }
        }
        Operation::Binary(function) => {
            // No operand to latch onto: the symbol is dropped, which also
            // covers two binary operators in a row.
            let Some(current) = accumulator.as_mut() else {
                return;
            };
            current.text.push(' ');
            current.text.push_str(symbol);
            resolve_pending(accumulator, pending, resolved);
            if let Some(first) = accumulator.take() {
                *pending = Some(PendingBinary {
                    function,
                    first_operand: first.value,
                });
                *resolved = Some(first);
            }
        }
        Operation::Equals => resolve_pending(accumulator, pending, resolved),
        // These mutate the log at recording time and never survive into a
        // replayed sequence; skip them if a stored log carries one anyway.
        Operation::Clear | Operation::Undo => {}
    }
}

fn resolve_pending(
    accumulator: &mut Option<Accumulator>,
    pending: &mut Option<PendingBinary>,
    resolved: &mut Option<Accumulator>,
) {
    let (Some(operation), Some(current)) = (pending.as_ref(), accumulator.as_mut()) else {
        return;
    };
    if let Some(chain) = resolved.take() {
        current.text = format!("{} {} ", chain.text, current.text);
    }
    current.value = operation.perform(current.value);
    *pending = None;
}

fn format_operand(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
