use anyhow::{anyhow, Result};

use tbproxy::{argsets, command, helpers};

const CMD_SERVE: &str = "serve";
const CMD_CALL: &str = "call";

fn main() -> Result<()> {
    helpers::load_dotenv();
    helpers::init_logging();

    let mut args = pico_args::Arguments::from_env();
    match args.subcommand()?.as_deref() {
        None | Some(CMD_SERVE) => command::serve(),
        Some(CMD_CALL) => command::call(argsets::CallArgs {
            action: args.free_from_str()?,
            device_id: args.free_from_str()?,
        }),
        _ => Err(anyhow!("Subcommand must be one of 'serve', 'call'")),
    }
}
