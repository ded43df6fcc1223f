//! Teacups from the first chapter of The Reasoned Schemer.
//!
//! Run with `RUST_LOG=mini_kraken=trace` to watch the search.

use mini_kraken::prelude::*;
use mini_kraken::{conde, defrel, run};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

defrel! {
    teacupo(t) {
        conde! {
            equals("tea", t.clone());
            equals("cup", t);
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(false).without_time())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    println!("{}", run!(*, x, teacupo(x))?);
    println!(
        "{}",
        run!(*, (x, y), conde! {
            teacupo(x.clone()), equals(true, y.clone());
            equals(false, x), equals(true, y);
        })?
    );

    for (i, solution) in run!((x, y), teacupo(x), teacupo(y))?.enumerate() {
        println!("{}: {}", i, solution?);
    }
    Ok(())
}
