//! The option pointing at a configuration file.

use clap::{Arg, ArgAction};

const DEFAULT_HELP: &str = "Path to configuration file (YAML or JSON format)";

/// Definition of the configuration-file option.
///
/// Defaults to `--config FILE`. The destination is derived from the first
/// long name with `-` replaced by `_`.
///
/// ```
/// use record_args::ConfigFlag;
///
/// let flag = ConfigFlag::long("config-file").short('c');
/// assert_eq!(flag.dest(), "config_file");
/// assert_eq!(flag.option_strings(), ["--config-file", "-c"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigFlag {
    longs: Vec<String>,
    short: Option<char>,
    help: String,
}

impl ConfigFlag {
    /// Configuration option answering to `--<name>`.
    #[must_use]
    pub fn long(name: impl Into<String>) -> Self {
        Self {
            longs: vec![name.into()],
            short: None,
            help: DEFAULT_HELP.to_owned(),
        }
    }

    /// Add another long name.
    #[must_use]
    pub fn alias(mut self, name: impl Into<String>) -> Self {
        self.longs.push(name.into());
        self
    }

    /// Add a short name.
    #[must_use]
    pub const fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Replace the help text.
    #[must_use]
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Destination name of the option's value.
    #[must_use]
    pub fn dest(&self) -> String {
        self.longs
            .first()
            .map(|long| long.replace('-', "_"))
            .unwrap_or_default()
    }

    /// Option strings the flag answers to.
    #[must_use]
    pub fn option_strings(&self) -> Vec<String> {
        self.longs
            .iter()
            .map(|long| format!("--{long}"))
            .chain(self.short.map(|short| format!("-{short}")))
            .collect()
    }

    pub(crate) fn to_arg(&self) -> Arg {
        let mut longs = self.longs.iter();
        let mut arg = Arg::new(self.dest())
            .value_name("FILE")
            .help(self.help.clone())
            .action(ArgAction::Set)
            .num_args(1)
            .value_parser(clap::value_parser!(String));
        if let Some(primary) = longs.next() {
            arg = arg.long(primary.clone());
        }
        arg = arg.visible_aliases(longs.cloned().collect::<Vec<_>>());
        if let Some(short) = self.short {
            arg = arg.short(short);
        }
        arg
    }
}

impl Default for ConfigFlag {
    fn default() -> Self {
        Self::long("config")
    }
}
