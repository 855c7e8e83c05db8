// Copyright 2023 Rémy Oudompheng. All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Estimate the permanent of a matrix given on the command line.
//!
//! Each argument is a row of the matrix (`permest 1,2 3,4`), or the whole
//! matrix can be given as a single argument (`permest "1 2; 3 4"`).
//! Without a matrix, the permanents of two test matrices are estimated.

use std::str::FromStr;

use permest::{estimate, IntMatrix, Preferences, Verbosity};

// Permanents 39470 and 73166432
const TEST_MATRICES: &[&str] = &[
    "1 2 3 4; 5 6 7 8; 9 13 31 6; 13 2 2 7",
    "12 21 13 4 67; 15 26 17 8 14; 9 13 31 6 12; 13 2 2 7 8; 22 11 20 20 0",
];

fn main() {
    let arg = arguments::parse(std::env::args()).unwrap();
    if arg.get::<bool>("help").is_some() {
        eprintln!("Usage: permest [OPTIONS] [ROW...]");
        eprintln!();
        eprintln!("Options:");
        eprintln!("  --help                    show this help");
        eprintln!("  --trials T:               number of random trials (default 1000)");
        eprintln!("  --threads N:              enable up to N computation threads");
        eprintln!("  --seed S:                 seed the random generator");
        eprintln!("  --verbose silent|info|verbose|debug");
        return;
    }
    let v = arg.get::<String>("verbose").unwrap_or("info".into());
    let mut prefs = Preferences::default();
    prefs.trials = arg.get::<usize>("trials");
    prefs.threads = arg.get::<usize>("threads");
    prefs.seed = arg.get::<u64>("seed");
    prefs.verbosity = match Verbosity::from_str(&v) {
        Ok(v) => v,
        Err(e) => fail(e),
    };

    let tpool: Option<rayon::ThreadPool> = match prefs.threads {
        None | Some(1) => None,
        Some(t) => {
            if prefs.verbose(Verbosity::Verbose) {
                eprintln!("Using a pool of {t} threads");
            }
            Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(t)
                    .build()
                    .expect("cannot create thread pool"),
            )
        }
    };
    let tpool = tpool.as_ref();

    if arg.orphans.is_empty() {
        // Short runs for the test report.
        let t = prefs.trials.unwrap_or(100);
        println!("PERMANENT TEST:");
        for s in TEST_MATRICES {
            let m = IntMatrix::from_str(s).unwrap();
            match estimate(&m, t, &prefs, tpool) {
                Ok(p) => println!("{}", p.round()),
                Err(e) => fail(e),
            }
        }
        return;
    }

    let m = match IntMatrix::from_str(&arg.orphans.join(";")) {
        Ok(m) => m,
        Err(e) => fail(e),
    };
    if prefs.verbose(Verbosity::Verbose) {
        eprint!("Input matrix:\n{m}");
    }
    match estimate(&m, prefs.trials(), &prefs, tpool) {
        Ok(p) => println!("{}", p.round()),
        Err(e) => fail(e),
    }
}

fn fail(e: permest::Error) -> ! {
    eprintln!("Error: {e}");
    std::process::exit(1);
}
