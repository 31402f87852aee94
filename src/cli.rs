use std::env;

/// Command line switches. Only the debug flag is recognised; anything else
/// on the command line is ignored so service files with stray arguments
/// still start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub debug: bool,
}

pub struct CliParser;

impl CliParser {
    pub fn parse() -> CliOptions {
        Self::parse_from(env::args().skip(1))
    }

    pub fn parse_from<I, S>(args: I) -> CliOptions
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = CliOptions::default();
        for arg in args {
            match arg.as_ref() {
                "-d" | "--debug" => options.debug = true,
                _ => {}
            }
        }
        options
    }
}
