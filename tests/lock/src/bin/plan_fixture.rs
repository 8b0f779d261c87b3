//! Binary that plans every built-in profile and prints deterministic
//! output lines for cross-process verification.
//!
//! Usage: `plan_fixture [profile...]` (defaults to all built-in profiles)
//!
//! Output: one `key=value` block per profile.

use choreo_harness::config::BUILTIN_PROFILES;
use choreo_harness::runner::run;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let names: Vec<&str> = if args.is_empty() {
        BUILTIN_PROFILES.to_vec()
    } else {
        args.iter().map(String::as_str).collect()
    };

    for name in names {
        let plan = run(name)?;
        let meta = &plan.outcome.graph.metadata;

        println!("profile={}", plan.profile.name);
        println!("profile_digest={}", plan.profile_digest);
        println!("catalog_digest={}", meta.catalog_digest);
        println!("policy_digest={}", meta.policy_digest);
        println!("search_graph_digest={}", plan.graph_digest);
        println!("termination_reason={}", meta.termination_reason);
        println!("total_pops={}", meta.total_pops);
        println!("total_expansions={}", meta.total_expansions);
        println!("solutions_found={}", plan.report.solutions_found);
        println!("alternatives={}", plan.report.alternatives.len());
        match &plan.report.best {
            Some(best) => {
                println!("plan_digest={}", best.record.digest()?);
                println!("sequence={}", best.record.sequence.join(","));
                println!("total_time={:.2}", best.record.total_time);
            }
            None => println!("plan_digest=none"),
        }
    }
    Ok(())
}
