//! oslab CLI - one subcommand per facility demo

use clap::{Parser, Subcommand};
use console::style;
use oslab::{crypto, exec, record, ticker, trace};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "oslab")]
#[command(about = "Small demos of OS and runtime facilities", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Capture and print the current call stack
    Trace {
        /// Maximum number of frames to resolve
        #[arg(long, default_value_t = trace::DEFAULT_MAX_FRAMES)]
        max_frames: usize,
    },

    /// Publish an incrementing counter into shared memory
    ShmServe {
        /// Shared memory name
        #[arg(default_value = "oslab_demo")]
        name: String,

        /// Delay between ticks in milliseconds
        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,

        /// Number of values to publish
        #[arg(long, default_value_t = ticker::TICK_COUNT)]
        count: u32,
    },

    /// Watch a shared-memory counter until its final value
    ShmWatch {
        /// Shared memory name
        #[arg(default_value = "oslab_demo")]
        name: String,

        /// Give up if no change arrives within this many seconds
        #[arg(long, default_value_t = 10)]
        timeout_secs: u64,

        /// Final value that ends the watch
        #[arg(long, default_value_t = ticker::TICK_COUNT - 1)]
        until: u32,
    },

    /// Run the crypto self-tests
    Crypto,

    /// Print a struct built with literal initialization
    StructInit,

    /// Run a command line through the shell and forward its exit code
    Run {
        /// Command line, passed to `sh -c`
        #[arg(required = true, trailing_var_arg = true)]
        command: Vec<String>,
    },
}

fn banner(title: &str) {
    println!("{}", style(format!("== oslab: {title} ==")).bold());
}

fn main() {
    let cli = Cli::parse();

    let code = match cli.command {
        Commands::Trace { max_frames } => run_trace(max_frames),
        Commands::ShmServe {
            name,
            interval_ms,
            count,
        } => run_shm_serve(&name, interval_ms, count),
        Commands::ShmWatch {
            name,
            timeout_secs,
            until,
        } => run_shm_watch(&name, timeout_secs, until),
        Commands::Crypto => run_crypto(),
        Commands::StructInit => run_struct_init(),
        Commands::Run { command } => run_shell(&command.join(" ")),
    };

    std::process::exit(code);
}

fn run_trace(max_frames: usize) -> i32 {
    banner("stack trace");
    trace::print(max_frames);
    0
}

fn run_shm_serve(name: &str, interval_ms: u64, count: u32) -> i32 {
    banner("shm publisher");

    let publisher = match ticker::TickPublisher::create(name) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{} {e}", style("[serve]").red());
            return 1;
        }
    };

    println!("[serve] publishing {count} values to '{name}'");
    publisher.run(Duration::from_millis(interval_ms), count, |value| {
        println!("[serve] {value:#04x}");
    });
    println!("[serve] done");
    0
}

fn run_shm_watch(name: &str, timeout_secs: u64, until: u32) -> i32 {
    banner("shm watcher");

    let watcher = match ticker::TickWatcher::open(name) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("{} {e}", style("[watch]").red());
            eprintln!("[watch] is the publisher running? try: oslab shm-serve {name}");
            return 1;
        }
    };

    let step = Duration::from_secs(timeout_secs);
    let outcome = watcher.run(until, step, |value| {
        println!("[watch] new value {value:#04x}");
    });

    match outcome {
        Ok(()) => {
            println!("[watch] reached {until:#04x}, done");
            0
        }
        Err(e) => {
            eprintln!("{} {e}", style("[watch]").red());
            1
        }
    }
}

fn run_crypto() -> i32 {
    banner("crypto self-tests");

    let result = crypto::run_self_tests(|name| {
        println!("[crypto] starting {name} test");
    });

    match result {
        Ok(()) => {
            println!("{}", style("[crypto] all tests passed").green());
            0
        }
        Err(e) => {
            eprintln!("{} {e}", style("[crypto]").red());
            1
        }
    }
}

fn run_struct_init() -> i32 {
    banner("struct literal");
    println!("{}", record::SampleRecord::demo());
    0
}

fn run_shell(command: &str) -> i32 {
    banner("shell runner");
    println!("[run] {command}");

    match exec::run(command) {
        Ok(status) => {
            let code = exec::forward_code(status);
            println!("[run] command returned {code}");
            code
        }
        Err(e) => {
            eprintln!("{} {e}", style("[run]").red());
            1
        }
    }
}
