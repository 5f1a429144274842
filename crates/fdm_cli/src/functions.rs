//! Built-in elementary functions for the `derive` and `step` commands.

use std::fmt;
use std::str::FromStr;

use crate::CliError;

/// Elementary function of one variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Exp,
    Ln,
    Sqrt,
    Tanh,
    Atan,
}

impl Function {
    /// All supported functions, in display order.
    pub const ALL: [Function; 7] = [
        Function::Sin,
        Function::Cos,
        Function::Exp,
        Function::Ln,
        Function::Sqrt,
        Function::Tanh,
        Function::Atan,
    ];

    /// Evaluate at `x`.
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Function::Sin => x.sin(),
            Function::Cos => x.cos(),
            Function::Exp => x.exp(),
            Function::Ln => x.ln(),
            Function::Sqrt => x.sqrt(),
            Function::Tanh => x.tanh(),
            Function::Atan => x.atan(),
        }
    }

    /// Check that `x` lies in the open domain of the function.
    pub fn check_domain(&self, x: f64) -> crate::Result<()> {
        let ok = match self {
            Function::Ln | Function::Sqrt => x > 0.0,
            _ => x.is_finite(),
        };
        if ok {
            Ok(())
        } else {
            Err(CliError::InvalidArgument(format!(
                "{} is not defined around x = {}",
                self, x
            )))
        }
    }

    /// Closed-form `q`-th derivative at `x`, where one is tabulated.
    pub fn exact_derivative(&self, x: f64, q: usize) -> Option<f64> {
        match (self, q) {
            (_, 0) => Some(self.eval(x)),
            // d^q sin = sin(x + q pi/2)
            (Function::Sin, _) => Some((x + q as f64 * std::f64::consts::FRAC_PI_2).sin()),
            (Function::Cos, _) => Some((x + q as f64 * std::f64::consts::FRAC_PI_2).cos()),
            (Function::Exp, _) => Some(x.exp()),
            // d^q ln = (-1)^(q-1) (q-1)! / x^q
            (Function::Ln, _) => {
                let sign = if q % 2 == 1 { 1.0 } else { -1.0 };
                let factorial: f64 = (1..q).map(|k| k as f64).product();
                Some(sign * factorial / x.powi(q as i32))
            }
            (Function::Sqrt, 1) => Some(0.5 / x.sqrt()),
            (Function::Tanh, 1) => Some(1.0 - x.tanh().powi(2)),
            (Function::Atan, 1) => Some(1.0 / (1.0 + x * x)),
            _ => None,
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Exp => "exp",
            Function::Ln => "ln",
            Function::Sqrt => "sqrt",
            Function::Tanh => "tanh",
            Function::Atan => "atan",
        };
        f.write_str(name)
    }
}

impl FromStr for Function {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.to_lowercase();
        Function::ALL
            .into_iter()
            .find(|function| function.to_string() == name)
            .ok_or_else(|| {
                CliError::InvalidArgument(format!(
                    "Unknown function: {}. Supported: sin, cos, exp, ln, sqrt, tanh, atan",
                    s
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_round_trip_names() {
        for function in Function::ALL {
            assert_eq!(function.to_string().parse::<Function>().unwrap(), function);
        }
        assert_eq!("SIN".parse::<Function>().unwrap(), Function::Sin);
        assert!("gamma".parse::<Function>().is_err());
    }

    #[test]
    fn test_domain() {
        assert!(Function::Ln.check_domain(0.5).is_ok());
        assert!(Function::Ln.check_domain(0.0).is_err());
        assert!(Function::Sqrt.check_domain(-1.0).is_err());
        assert!(Function::Sin.check_domain(-1.0).is_ok());
        assert!(Function::Exp.check_domain(f64::INFINITY).is_err());
    }

    #[test]
    fn test_exact_derivatives() {
        let x = 0.7;
        assert_relative_eq!(Function::Sin.exact_derivative(x, 1).unwrap(), x.cos(), epsilon = 1e-15);
        assert_relative_eq!(Function::Sin.exact_derivative(x, 2).unwrap(), -x.sin(), epsilon = 1e-15);
        assert_relative_eq!(Function::Cos.exact_derivative(x, 1).unwrap(), -x.sin(), epsilon = 1e-15);
        assert_relative_eq!(Function::Ln.exact_derivative(x, 1).unwrap(), 1.0 / x, epsilon = 1e-15);
        assert_relative_eq!(
            Function::Ln.exact_derivative(x, 3).unwrap(),
            2.0 / x.powi(3),
            epsilon = 1e-12
        );
        assert_relative_eq!(Function::Atan.exact_derivative(x, 1).unwrap(), 1.0 / 1.49, epsilon = 1e-15);
        assert!(Function::Sqrt.exact_derivative(x, 2).is_none());
        assert_eq!(Function::Tanh.exact_derivative(x, 0), Some(x.tanh()));
    }
}
