use std::process;

use tracing::error;

fn main() {
    process::exit(try_main());
}

fn try_main() -> i32 {
    let args = match macforge::cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{:#}", e);
            return 1;
        }
    };

    if let Err(e) = macforge::init_logging(args.debug) {
        eprintln!("{:#}", e);
        return 1;
    }

    match macforge::run(args) {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            1
        }
    }
}
