//! Hello world entry point: resolve the greeting, then print it.

use clap::Arg;
use record_args::schema::TypeKind;
use record_args::{CustomFlag, RecordArgs, boundary};
use tracing_subscriber::EnvFilter;

use hello_world::error::HelloWorldError;
use hello_world::greeting::{Greeting, build_plan, print_plan};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    run().map_err(color_eyre::eyre::Report::from)
}

fn run() -> Result<(), HelloWorldError> {
    let args = RecordArgs::builder()
        .name("hello_world")
        .about("Greets someone using layered record arguments")
        .record::<Greeting>()?
        .flag(
            CustomFlag::new(
                Arg::new("times")
                    .short('n')
                    .long("times")
                    .value_name("COUNT")
                    .help("How many times to print the greeting"),
            )
            .with_kind(TypeKind::int()),
        )?
        .build()?;
    let mut resolution = boundary::parse_or_exit(&args);
    let times = boundary::exit_on_error(&args, resolution.flag_as::<u8>("times"))
        .unwrap_or(1);
    let greeting: Greeting = resolution
        .take("Greeting")
        .ok_or(HelloWorldError::MissingRecord("Greeting"))?;
    tracing::debug!(?greeting, times, "resolved greeting");
    let plan = build_plan(&greeting, times)?;
    print_plan(&plan)
}
