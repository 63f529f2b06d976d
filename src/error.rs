use std::fmt::Display;

/// Failures at the edges of the calculator (files, command line, encoding).
///
/// The engine itself has no failure modes.
#[derive(Debug)]
pub enum PulleyError {
    /// A command-line value could not be understood
    Input(String),
    /// The settings file is unreadable or holds invalid values
    Settings(String),
    /// Encoding the results or writing the diagram failed
    Output(String),
}

impl Display for PulleyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (err_name, value) = match self {
            PulleyError::Input(v) => ("Input", v),
            PulleyError::Settings(v) => ("Settings", v),
            PulleyError::Output(v) => ("Output", v),
        };

        write!(f, "{} error: {}", err_name, value)
    }
}

impl std::error::Error for PulleyError {}
