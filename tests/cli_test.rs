use assert_cmd::Command;
use predicates::prelude::*;

fn twinprime() -> Command {
    let mut cmd = Command::cargo_bin("twinprime").expect("Failed to find twinprime binary");
    cmd.env_remove("TWINPRIME_RANGE")
        .env_remove("TWINPRIME_THREADS")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_prompts_and_prints_twins() {
    twinprime()
        .write_stdin("20\n4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome to the twin prime counter!"))
        .stdout(predicate::str::contains("Enter search range: "))
        .stdout(predicate::str::contains("Enter number of threads: "))
        .stdout(predicate::str::contains(
            "Twin Primes; \n3 , 5 , 7 , 11 , 13 , 17 , 19\n",
        ))
        .stdout(
            predicate::str::is_match(
                r"19\nTime Taken: \d+ms\nTotal Number of Primes : 8\n$",
            )
            .unwrap(),
        );
}

#[test]
fn test_flags_skip_prompts() {
    twinprime()
        .args(["--range", "10", "--threads", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Enter search range").not())
        .stdout(predicate::str::contains("3 , 5 , 7\n"))
        .stdout(predicate::str::contains("Total Number of Primes : 4"));
}

#[test]
fn test_env_supplies_thread_count() {
    twinprime()
        .env("TWINPRIME_THREADS", "3")
        .write_stdin("100\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Enter number of threads").not())
        .stdout(predicate::str::contains("Total Number of Primes : 25"));
}

#[test]
fn test_empty_range_prints_nothing() {
    twinprime()
        .write_stdin("-5\n2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Twin Primes; \n\nTime Taken: "))
        .stdout(predicate::str::contains("Total Number of Primes : 0"));
}

#[test]
fn test_locked_exhaustive_matches() {
    twinprime()
        .args([
            "--range",
            "1000",
            "--threads",
            "8",
            "--aggregation",
            "locked",
            "--trial",
            "exhaustive",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Number of Primes : 168"));
}

#[test]
fn test_verbose_prints_statistics() {
    twinprime()
        .args(["--range", "50", "--threads", "2", "--verbose"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Scan Statistics:"))
        .stdout(predicate::str::contains("Workers: 2"))
        .stdout(predicate::str::contains("Worker 1 [26, 50)"));
}

#[test]
fn test_zero_threads_fails() {
    twinprime()
        .write_stdin("100\n0\n")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("worker count must be positive"))
        .stdout(predicate::str::contains("Total Number of Primes").not());
}

#[test]
fn test_malformed_input_fails() {
    twinprime()
        .write_stdin("lots\n4\n")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid search range 'lots'"));
}

#[test]
fn test_missing_input_fails() {
    twinprime()
        .write_stdin("20\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "input ended before number of threads was entered",
        ));
}
