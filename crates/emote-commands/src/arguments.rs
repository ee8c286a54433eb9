//! Binding of parsed invocations onto a handler's named parameters.

use crate::error::ArgumentError;
use crate::parser::CommandInvocation;
use crate::value::TypedValue;
use std::collections::HashMap;

/// Parameters a handler accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signature {
    /// Named parameters, bound by position first and then by keyword.
    Named(&'static [&'static str]),
    /// Any number of positional values and no keywords.
    Variadic,
}

/// Arguments bound for one handler call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    values: HashMap<&'static str, TypedValue>,
    rest: Vec<TypedValue>,
}

impl Arguments {
    /// Binds `invocation` to `signature`.
    ///
    /// Positional values fill parameters left to right, then keyword values
    /// fill parameters by name. Surplus positional values, unknown keywords,
    /// and parameters given both ways are rejected.
    pub fn bind(invocation: CommandInvocation, signature: Signature) -> Result<Self, ArgumentError> {
        let CommandInvocation {
            name: command,
            positional,
            keyword,
        } = invocation;

        let params = match signature {
            Signature::Variadic => {
                if let Some(name) = keyword.into_keys().min() {
                    return Err(ArgumentError::UnexpectedKeyword { command, name });
                }
                return Ok(Self {
                    values: HashMap::new(),
                    rest: positional,
                });
            }
            Signature::Named(params) => params,
        };

        if positional.len() > params.len() {
            return Err(ArgumentError::TooManyPositional {
                command,
                expected: params.len(),
                given: positional.len(),
            });
        }

        let mut values: HashMap<&'static str, TypedValue> =
            params.iter().copied().zip(positional).collect();

        let mut keyword: Vec<(String, TypedValue)> = keyword.into_iter().collect();
        keyword.sort_by(|a, b| a.0.cmp(&b.0));
        for (name, value) in keyword {
            let Some(param) = params.iter().copied().find(|p| *p == name) else {
                return Err(ArgumentError::UnexpectedKeyword { command, name });
            };
            if values.contains_key(param) {
                return Err(ArgumentError::MultipleValues { command, name });
            }
            values.insert(param, value);
        }

        Ok(Self {
            values,
            rest: Vec::new(),
        })
    }

    /// Raw value bound to `name`.
    pub fn get(&self, name: &str) -> Option<&TypedValue> {
        self.values.get(name)
    }

    /// Positional values of a variadic handler.
    pub fn rest(&self) -> &[TypedValue] {
        &self.rest
    }

    /// Integer argument, if given.
    pub fn int(&self, name: &str) -> Result<Option<i64>, ArgumentError> {
        match self.get(name) {
            None => Ok(None),
            Some(TypedValue::Integer(value)) => Ok(Some(*value)),
            Some(other) => Err(mismatch(name, "int", other)),
        }
    }

    /// Integer argument, or `default` when absent.
    pub fn int_or(&self, name: &str, default: i64) -> Result<i64, ArgumentError> {
        Ok(self.int(name)?.unwrap_or(default))
    }

    /// Integer argument that must be given.
    pub fn required_int(&self, name: &str) -> Result<i64, ArgumentError> {
        self.int(name)?.ok_or_else(|| ArgumentError::Missing {
            name: name.to_string(),
        })
    }

    /// Boolean argument, or `default` when absent.
    pub fn bool_or(&self, name: &str, default: bool) -> Result<bool, ArgumentError> {
        match self.get(name) {
            None => Ok(default),
            Some(TypedValue::Boolean(value)) => Ok(*value),
            Some(other) => Err(mismatch(name, "bool", other)),
        }
    }

    /// String argument, if given.
    pub fn string(&self, name: &str) -> Result<Option<&str>, ArgumentError> {
        match self.get(name) {
            None => Ok(None),
            Some(TypedValue::String(value)) => Ok(Some(value)),
            Some(other) => Err(mismatch(name, "str", other)),
        }
    }
}

fn mismatch(name: &str, expected: &'static str, found: &TypedValue) -> ArgumentError {
    ArgumentError::TypeMismatch {
        name: name.to_string(),
        expected,
        found: found.type_name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_command;

    const USAGE: Signature = Signature::Named(&["emote", "ascending", "columns", "limit"]);

    fn bind(raw: &str, signature: Signature) -> Result<Arguments, ArgumentError> {
        Arguments::bind(parse_command("@@", raw).unwrap(), signature)
    }

    #[test]
    fn test_positional_then_keyword() {
        let args = bind("@@usage \"<:a:1>\" True --limit 5", USAGE).unwrap();
        assert_eq!(args.string("emote").unwrap(), Some("<:a:1>"));
        assert!(args.bool_or("ascending", false).unwrap());
        assert_eq!(args.int_or("columns", 3).unwrap(), 3);
        assert_eq!(args.int_or("limit", 40).unwrap(), 5);
    }

    #[test]
    fn test_too_many_positional() {
        let err = bind("@@clean 1 2", Signature::Named(&["limit"])).unwrap_err();
        assert_eq!(
            err,
            ArgumentError::TooManyPositional {
                command: "clean".to_string(),
                expected: 1,
                given: 2,
            }
        );
    }

    #[test]
    fn test_unknown_keyword() {
        let err = bind("@@usage --bogus 1", USAGE).unwrap_err();
        assert!(matches!(err, ArgumentError::UnexpectedKeyword { name, .. } if name == "bogus"));
    }

    #[test]
    fn test_multiple_values() {
        let err = bind("@@clean 5 --limit 6", Signature::Named(&["limit"])).unwrap_err();
        assert!(matches!(err, ArgumentError::MultipleValues { name, .. } if name == "limit"));
    }

    #[test]
    fn test_variadic() {
        let args = bind("@@help usage mono", Signature::Variadic).unwrap();
        assert_eq!(args.rest().len(), 2);
        assert!(bind("@@help --x 1", Signature::Variadic).is_err());
    }

    #[test]
    fn test_type_mismatch_and_missing() {
        let args = bind("@@reboot soon", Signature::Named(&["time"])).unwrap();
        assert_eq!(
            args.required_int("time").unwrap_err(),
            ArgumentError::TypeMismatch {
                name: "time".to_string(),
                expected: "int",
                found: "str",
            }
        );

        let args = bind("@@reboot", Signature::Named(&["time"])).unwrap();
        assert!(matches!(
            args.required_int("time").unwrap_err(),
            ArgumentError::Missing { .. }
        ));
    }
}
