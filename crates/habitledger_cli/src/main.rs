//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `habitledger_core` linkage.
//! - Open a throwaway in-memory ledger so schema bootstrap is exercised end
//!   to end.

use std::process::ExitCode;

fn main() -> ExitCode {
    println!(
        "habitledger_core version={}",
        habitledger_core::core_version()
    );
    println!(
        "schema latest_version={}",
        habitledger_core::db::migrations::latest_version()
    );

    match habitledger_core::open_ledger_in_memory() {
        Ok(_conn) => println!("ledger probe=ok"),
        Err(err) => {
            eprintln!("ledger probe=error {err}");
            return ExitCode::FAILURE;
        }
    }

    println!("quote=\"{}\"", habitledger_core::motivational_quote());
    ExitCode::SUCCESS
}
