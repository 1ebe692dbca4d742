// tests/arg_vector.rs

use proptest::prelude::*;

use pgspawn::errors::LaunchError;
use pgspawn::launch::ArgVector;

#[test]
fn program_and_argv0_are_kept_apart() {
    let argv = ArgVector::new("/bin/bash", &["bash", "-x", "nhat2.sh"]).unwrap();

    assert_eq!(argv.program_os(), "/bin/bash");
    assert_eq!(argv.arg0_os(), "bash");
    assert_eq!(argv.rest_os().collect::<Vec<_>>(), vec!["-x", "nhat2.sh"]);
    assert_eq!(argv.args().count(), 3);
}

#[test]
fn empty_non_leading_args_are_allowed() {
    let argv = ArgVector::new("/bin/sh", &["sh", "-c", ""]).unwrap();
    assert_eq!(argv.args_display(), vec!["sh", "-c", ""]);
}

#[test]
fn missing_argv0_is_rejected() {
    let none: [&str; 0] = [];
    assert!(matches!(
        ArgVector::new("/bin/sh", &none),
        Err(LaunchError::ConfigError(_))
    ));
}

proptest! {
    #[test]
    fn nul_free_strings_always_validate(
        program in "[^\u{0}]{1,32}",
        arg0 in "[^\u{0}]{1,16}",
        rest in proptest::collection::vec("[^\u{0}]{0,16}", 0..6),
    ) {
        let mut args = vec![arg0];
        args.extend(rest);

        let argv = ArgVector::new(&program, &args).unwrap();

        prop_assert_eq!(argv.program_display(), program);
        prop_assert_eq!(argv.args_display(), args);
        for arg in argv.args() {
            prop_assert_eq!(arg.to_bytes_with_nul().last(), Some(&0u8));
        }
    }

    #[test]
    fn any_interior_nul_is_rejected(
        prefix in "[a-z/]{0,8}",
        suffix in "[a-z]{0,8}",
        position in 0usize..3,
    ) {
        let poisoned = format!("{prefix}\0{suffix}");
        let mut args = vec!["sh".to_string(), "-c".to_string(), "true".to_string()];
        let program = if position == 0 {
            poisoned
        } else {
            args[position] = poisoned;
            "/bin/sh".to_string()
        };

        let result = ArgVector::new(&program, &args);
        prop_assert!(
            matches!(result, Err(LaunchError::ConfigError(ref msg)) if msg.contains("NUL")),
            "expected NUL rejection, got {:?}", result
        );
    }
}
