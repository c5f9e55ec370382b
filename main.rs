use std::error::Error;
use std::fmt::Display;

use clap::Parser;
use doubly_linked_sequence::Sequence;
use log::{debug, LevelFilter};

/// Walks a doubly linked sequence through every operation and prints it after
/// each step.
#[derive(Parser, Debug)]
struct Args {
    /// Seed value followed by the values to append.
    #[clap(default_values_t = [7, 9, 3, 1])]
    values: Vec<i64>,
    /// Enable debug logging. `RUST_LOG` still applies when unset.
    #[clap(long, env = "DLL_DEMO_LOG")]
    log: bool,
    /// Print every node with its neighbours after each step.
    #[clap(long)]
    nodes: bool,
}

struct Demo {
    seq: Sequence<i64>,
    nodes: bool,
}

impl Demo {
    fn step(&self, label: impl Display) {
        println!("\n{}:", label);
        println!("{}", self.seq);
        if self.nodes {
            for index in 0..self.seq.len() {
                if let Ok(node) = self.seq.node(index) {
                    println!("  {}", node);
                }
            }
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if args.log {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    let (&seed, rest) = args
        .values
        .split_first()
        .ok_or("at least one value is required")?;
    debug!("seeding with {} and {} appended values", seed, rest.len());

    let mut demo = Demo {
        seq: Sequence::new(seed),
        nodes: args.nodes,
    };
    demo.step(format_args!("Initial sequence ({})", seed));

    for &value in rest {
        demo.seq.append(value);
        demo.step(format_args!("append({})", value));
    }

    for _ in 0..=rest.len() {
        let value = demo.seq.pop()?;
        demo.step(format_args!("pop() -> {}", value));
    }
    if let Err(err) = demo.seq.pop() {
        println!("\npop() on empty sequence: {}", err);
    }

    for &value in rest.iter().rev() {
        demo.seq.prepend(value);
        demo.step(format_args!("prepend({})", value));
    }
    while let Ok(value) = demo.seq.pop_first() {
        demo.step(format_args!("pop_first() -> {}", value));
    }

    for value in [3, 1, 8, 4, 2] {
        demo.seq.append(value);
    }
    demo.step("Rebuilt");
    for index in [2, 4] {
        let walk = demo.seq.walk(index)?;
        println!(
            "get({}) = {} ({:?}, {} hops)",
            index,
            demo.seq.get(index)?,
            walk.direction,
            walk.hops
        );
    }

    demo.seq.set_value(2, 99)?;
    demo.step("set_value(2, 99)");
    demo.seq.set_value(4, 30)?;
    demo.step("set_value(4, 30)");

    demo.seq.insert(4, 1)?;
    demo.step("insert(4, 1)");
    demo.seq.insert(1, 12)?;
    demo.step("insert(1, 12)");

    for index in [1, 5, 3] {
        let value = demo.seq.remove(index)?;
        demo.step(format_args!("remove({}) -> {}", index, value));
    }

    demo.seq.reverse();
    demo.step("reverse()");

    demo.seq.check_invariants()?;
    Ok(())
}
