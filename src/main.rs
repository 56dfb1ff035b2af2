use {
    god::{
        cmd::{self, MainCmd},
        error::BootstrapError,
        output,
    },
    std::{env, process},
};

fn main() {
    // Anything other than the one recognized command token, including no
    // arguments at all, gets the usage text on stdout and exit code 1.
    if !cmd::recognized(env::args().nth(1).as_deref()) {
        print!("{}", cmd::usage());
        process::exit(1);
    }

    let cmd: MainCmd = argh::from_env();
    if let Err(err) = cmd.run() {
        output::error(&format!("{err}"));
        // Propagate the failing child's own exit code where there is one.
        let code = err
            .downcast_ref::<BootstrapError>()
            .map_or(1, BootstrapError::exit_code);
        process::exit(code);
    }
}
