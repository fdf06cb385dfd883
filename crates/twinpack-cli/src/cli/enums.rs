use clap::ValueEnum;
use twinpack_config::OutputMode;

/// Module-output mode override
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum Mode {
    /// One `[name].js` script per entry, runtime chunk loader, root public path
    #[value(name = "traditional")]
    Traditional,

    /// Content-hashed native modules loaded with `import`, auto public path
    #[value(name = "module")]
    Module,
}

impl From<Mode> for OutputMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Traditional => OutputMode::Traditional,
            Mode::Module => OutputMode::Module,
        }
    }
}

/// What `resolve` prints
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum Emit {
    /// The bundler configuration document
    #[value(name = "config")]
    Config,

    /// The output layout plan
    #[value(name = "plan")]
    Plan,

    /// Both, as `{ "plan": ..., "config": ... }`
    #[value(name = "all")]
    All,
}
