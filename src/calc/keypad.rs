use thiserror::Error;

use super::format::{format_number, round_result};

/// Shown when an operation has no numeric result. Entering the error state
/// clears all operand and operator state.
pub const ERROR_DISPLAY: &str = "Error";

/// A binary arithmetic operator.
///
/// `Percent` here is the binary variant (`(a / 100) * b`), selected like any
/// other operator. The standalone percent key is [`Key::Percent`] and acts on
/// the display alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Percent,
}

impl Operator {
    /// Symbol used in history and expression text.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
            Self::Percent => "%",
        }
    }

    /// Apply the operator to its operands.
    ///
    /// Division by zero is an [`ArithmeticError`], not a panic and not an
    /// IEEE infinity; the keypad turns it into the error display state.
    pub fn apply(self, a: f64, b: f64) -> Result<f64, ArithmeticError> {
        match self {
            Self::Add => Ok(a + b),
            Self::Subtract => Ok(a - b),
            Self::Multiply => Ok(a * b),
            Self::Divide => {
                if b == 0.0 {
                    Err(ArithmeticError::DivideByZero)
                } else {
                    Ok(a / b)
                }
            }
            Self::Percent => Ok((a / 100.0) * b),
        }
    }
}

/// Arithmetic failure. Handled entirely on the keypad side; it never crosses
/// the UI boundary and never reaches the log service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    #[error("division by zero")]
    DivideByZero,
}

/// A single key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Digit 0–9.
    Digit(u8),
    /// Decimal separator. At most one per number.
    Decimal,
    /// Select or substitute the pending operator.
    Operator(Operator),
    Equals,
    Clear,
    /// Multiply the displayed value by -1.
    ToggleSign,
    /// Standalone percent: divide the displayed value by 100.
    Percent,
    Backspace,
}

/// A side effect requested by the machine.
///
/// The keypad never performs I/O itself; a successful evaluate emits
/// `Persist` and the driver decides how to deliver it. Tests assert on the
/// emitted command instead of observing the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Persist { expression: String, result: String },
}

/// The keypad session state.
///
/// Conceptually a five-state machine (idle, entering the first operand,
/// operator pending, entering the second operand, error) encoded in the
/// field combination below. `display == "Error"` marks the error state.
///
/// [`Keypad::press`] runs one transition to completion; transitions never
/// interleave and never block on the commands they emit.
#[derive(Debug, Clone, PartialEq)]
pub struct Keypad {
    /// Current entry buffer or last result, as shown to the user.
    pub display: String,
    pub first_operand: Option<f64>,
    pub pending_operator: Option<Operator>,
    /// Set after an operator or evaluate; the next digit replaces the
    /// buffer instead of extending it.
    pub awaiting_second_operand: bool,
    /// Cosmetic running trace of the in-progress expression. Rebuilt on
    /// every operator/evaluate action; never feeds back into computation.
    pub history: String,
}

impl Default for Keypad {
    fn default() -> Self {
        Self {
            display: "0".to_string(),
            first_operand: None,
            pending_operator: None,
            awaiting_second_operand: false,
            history: String::new(),
        }
    }
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the keypad is in the error state.
    pub fn is_error(&self) -> bool {
        self.display == ERROR_DISPLAY
    }

    /// Feed one key press through the machine.
    ///
    /// Returns the side effect the press requested, if any. Only a
    /// successful evaluate emits one.
    pub fn press(&mut self, key: Key) -> Option<Command> {
        match key {
            Key::Digit(d) => self.press_digit(d),
            Key::Decimal => self.press_decimal(),
            Key::Operator(op) => self.press_operator(op),
            Key::Equals => return self.press_equals(),
            Key::Clear => *self = Self::default(),
            Key::ToggleSign => self.press_toggle_sign(),
            Key::Percent => self.press_percent(),
            Key::Backspace => self.press_backspace(),
        }
        None
    }

    fn press_digit(&mut self, digit: u8) {
        debug_assert!(digit <= 9);
        let ch = char::from(b'0' + digit);
        if self.awaiting_second_operand {
            self.display = ch.to_string();
            self.awaiting_second_operand = false;
        } else if self.display == "0" {
            self.display = ch.to_string();
        } else {
            self.display.push(ch);
        }
    }

    fn press_decimal(&mut self) {
        if self.awaiting_second_operand {
            self.display = "0.".to_string();
            self.awaiting_second_operand = false;
        } else if !self.display.contains('.') {
            self.display.push('.');
        }
    }

    fn press_operator(&mut self, next: Operator) {
        // Operator substitution: nothing entered since the last operator, so
        // the new one replaces it without evaluating.
        if self.pending_operator.is_some() && self.awaiting_second_operand {
            self.pending_operator = Some(next);
            if let Some(first) = self.first_operand {
                self.history = format!("{} {}", format_number(first), next.symbol());
            }
            return;
        }

        let input = self.display.parse::<f64>().ok();

        match (self.first_operand, self.pending_operator) {
            (None, _) => {
                if let Some(value) = input {
                    self.first_operand = Some(value);
                    self.history = format!("{} {}", format_number(value), next.symbol());
                }
            }
            // Chained evaluation: a second operator arrived before `=`, so the
            // in-progress expression evaluates now and its result becomes the
            // new first operand.
            (Some(first), Some(op)) => {
                let second = input.unwrap_or(0.0);
                match op.apply(first, second) {
                    Ok(value) => {
                        let result = round_result(value);
                        self.display = format_number(result);
                        self.first_operand = Some(result);
                        self.history = format!("{} {}", self.display, next.symbol());
                    }
                    Err(_) => {
                        self.enter_error_state();
                        self.history.clear();
                        return;
                    }
                }
            }
            // First operand survives from a previous evaluate; the display is
            // re-shown in history but does not replace it.
            (Some(_), None) => {
                if let Some(value) = input {
                    self.history = format!("{} {}", format_number(value), next.symbol());
                }
            }
        }

        self.awaiting_second_operand = true;
        self.pending_operator = Some(next);
    }

    fn press_equals(&mut self) -> Option<Command> {
        let (Some(first), Some(op)) = (self.first_operand, self.pending_operator) else {
            return None;
        };
        if self.awaiting_second_operand {
            return None;
        }

        let second = self.display.parse::<f64>().unwrap_or(0.0);
        let expression = format!(
            "{} {} {}",
            format_number(first),
            op.symbol(),
            format_number(second)
        );
        self.history = format!("{} =", expression);

        match op.apply(first, second) {
            Ok(value) => {
                let result = round_result(value);
                let rendered = format_number(result);
                self.display = rendered.clone();
                self.first_operand = Some(result);
                self.pending_operator = None;
                self.awaiting_second_operand = true;
                Some(Command::Persist {
                    expression,
                    result: rendered,
                })
            }
            Err(_) => {
                // History keeps the attempted expression.
                self.enter_error_state();
                None
            }
        }
    }

    fn press_toggle_sign(&mut self) {
        if let Ok(value) = self.display.parse::<f64>() {
            self.display = format_number(-value);
        }
    }

    fn press_percent(&mut self) {
        if let Ok(value) = self.display.parse::<f64>() {
            self.display = format_number(value / 100.0);
        }
    }

    fn press_backspace(&mut self) {
        if !self.awaiting_second_operand && self.display.chars().count() > 1 {
            self.display.pop();
        } else {
            self.display = "0".to_string();
        }
    }

    fn enter_error_state(&mut self) {
        self.display = ERROR_DISPLAY.to_string();
        self.first_operand = None;
        self.pending_operator = None;
        self.awaiting_second_operand = true;
    }
}
