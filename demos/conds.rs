//! Demonstrate conde with more than one successful line

use mini_kraken::prelude::*;
use mini_kraken::{conde, defrel, list, run};

defrel! {
    /// Create a goal that succeeds if x occurs in s1 or s2 and r contains the correct result
    whiche(x, s1, s2, r) {
        conde! {
            membero(x.clone(), s1.clone()), membero(x.clone(), s2.clone()), equals(r.clone(), "both");
            membero(x.clone(), s1), equals(r.clone(), "one");
            membero(x, s2), equals(r, "two");
        }
    }
}

fn main() -> Result<()> {
    println!(
        "Which list contains 3 using conde? {}",
        run!(*, q, whiche(3, list![1, 2, 3], list![3, 4, 5], q))?
    );
    println!(
        "Which list contains 1 using conde? {}",
        run!(*, q, whiche(1, list![1, 2, 3], list![3, 4, 5], q))?
    );
    println!(
        "Where can 3 be? {}",
        run!(*, (s, r), nullo(s.clone()), whiche(3, s, list![3, 4, 5], r))?
    );
    Ok(())
}
