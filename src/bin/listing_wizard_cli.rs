use std::{env, process};

use listing_wizard::{
    cli::{self, output, LaunchOptions},
    init,
};

#[tokio::main]
async fn main() {
    init();

    let options = match LaunchOptions::parse(env::args().skip(1)) {
        Ok(options) => options,
        Err(err) => {
            output::error(&err);
            eprintln!("{}", cli::usage());
            process::exit(2);
        }
    };
    if options.help {
        println!("{}", cli::usage());
        return;
    }

    if let Err(err) = cli::run(options).await {
        output::error(&err);
        process::exit(1);
    }
}
