use std::io;
use std::process;
use ttab::args::{Args, Invocation};
use ttab::batch;
use ttab::errors::BatchError;
use ttab::session::Session;

fn main() {
    env_logger::init();
    let args = Args::parse();

    match args.invocation() {
        Invocation::Interactive => run_interactive(),
        Invocation::Stdin => report_total(batch::sum_stdin()),
        Invocation::File(path) => report_total(batch::sum_path(&path)),
    }
}

fn run_interactive() {
    let mut session = Session::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    if let Err(err) = session.run(stdin.lock(), &mut stdout, &mut stderr) {
        log::error!("interactive session failed: {}", err);
        eprintln!("ERROR:  {}", err);
        process::exit(err.exit_code());
    }
}

fn report_total(result: Result<String, BatchError>) {
    match result {
        Ok(total) => println!("{}", total),
        Err(err) => {
            log::error!("batch summation failed: {}", err);
            eprintln!("ERROR:  {}", err);
            eprintln!("\nUsage:  ttab [FILE | -]");
            process::exit(err.exit_code());
        }
    }
}
