use husk_pal::{
    DirOps, EnvOps, EnvScope, FakePal, HostPal, Operation, PalError, ProcOps, SpecialDirOption,
    SpecialFolder,
};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};

#[test]
fn cwd_set_then_get_round_trips() {
    let pal = FakePal::new();
    pal.add_dir("/var/lib/husk");

    pal.set_current_dir(Path::new("/var/lib/husk"))
        .expect("directory was arranged");

    assert_eq!(
        pal.current_dir().expect("cwd"),
        PathBuf::from("/var/lib/husk")
    );
}

#[test]
fn cwd_missing_target_fails_and_keeps_cwd() {
    let pal = FakePal::new();
    let before = pal.current_dir().expect("cwd");

    let err = pal.set_current_dir(Path::new("/missing/dir")).unwrap_err();

    assert!(matches!(err, PalError::NotFound(_)));
    assert_eq!(pal.current_dir().expect("cwd"), before);
}

#[test]
fn cwd_empty_path_is_invalid_argument() {
    let pal = FakePal::new();
    assert!(matches!(
        pal.set_current_dir(Path::new("")).unwrap_err(),
        PalError::InvalidArgument(_)
    ));
}

#[test]
fn env_set_then_get_round_trips_in_every_scope() {
    let pal = FakePal::new();

    for scope in [EnvScope::Process, EnvScope::User, EnvScope::Machine] {
        pal.set_var_in("HUSK_RT", "value", scope).expect("set");
        assert_eq!(
            pal.var_in("HUSK_RT", scope).expect("get").as_deref(),
            Some("value"),
            "round trip in {scope} scope"
        );
    }
}

#[test]
fn env_write_in_one_scope_is_invisible_in_others() {
    let pal = FakePal::new();

    pal.set_var_in("ONLY_USER", "u", EnvScope::User).expect("set");

    assert_eq!(pal.var("ONLY_USER").expect("process get"), None);
    assert_eq!(
        pal.var_in("ONLY_USER", EnvScope::Machine).expect("machine get"),
        None
    );
    assert_eq!(
        pal.var_in("ONLY_USER", EnvScope::User)
            .expect("user get")
            .as_deref(),
        Some("u")
    );
}

#[test]
fn env_empty_value_deletes_and_vanishes_from_bulk_read() {
    let pal = FakePal::new();
    pal.set_var("DOOMED", "soon").expect("set");
    assert!(pal.vars().expect("vars").contains_key("DOOMED"));

    pal.set_var("DOOMED", "").expect("delete");

    assert_eq!(pal.var("DOOMED").expect("get"), None);
    assert!(!pal.vars().expect("vars").contains_key("DOOMED"));
}

#[test]
fn env_deleting_missing_variable_is_noop() {
    let pal = FakePal::new();
    pal.set_var("NEVER_EXISTED", "").expect("no-op delete");
    assert_eq!(pal.var("NEVER_EXISTED").expect("get"), None);
}

#[test]
fn env_rejects_malformed_names_on_read_and_write() {
    let pal = FakePal::new();

    for bad in ["", "A=B", "NUL\0NAME"] {
        assert!(
            matches!(pal.var(bad).unwrap_err(), PalError::InvalidArgument(_)),
            "read of {bad:?}"
        );
        assert!(
            matches!(
                pal.set_var(bad, "v").unwrap_err(),
                PalError::InvalidArgument(_)
            ),
            "write of {bad:?}"
        );
    }
}

#[test]
fn env_bulk_read_is_sorted_by_name() {
    let pal = FakePal::new();
    pal.set_var("ZEBRA", "3").expect("set");
    pal.set_var("ALPHA", "1").expect("set");
    pal.set_var("MIKE", "2").expect("set");

    let vars = pal.vars().expect("vars");
    let names: Vec<&String> = vars.keys().collect();
    assert_eq!(names, ["ALPHA", "MIKE", "ZEBRA"]);
}

#[test]
fn env_bulk_entries_match_single_reads() {
    let pal = FakePal::new();
    pal.set_var("HOST", "pluto").expect("set");
    pal.set_var("PORT", "9001").expect("set");
    pal.set_var("LANG", "C.UTF-8").expect("set");

    for (name, value) in pal.vars().expect("vars") {
        assert_eq!(
            pal.var(&name).expect("get").as_deref(),
            Some(value.as_str()),
            "bulk entry for {name}"
        );
    }
}

#[test]
fn special_folder_default_lookup_never_fabricates() {
    let pal = FakePal::new();
    pal.set_special_dir(SpecialFolder::Config, "/home/fake/.config");

    // Location is known but the directory does not exist yet.
    assert_eq!(pal.special_dir(SpecialFolder::Config).expect("lookup"), None);
    assert_eq!(
        pal.special_dir_with(SpecialFolder::Config, SpecialDirOption::DoNotVerify)
            .expect("raw lookup"),
        Some(PathBuf::from("/home/fake/.config"))
    );

    let created = pal
        .special_dir_with(SpecialFolder::Config, SpecialDirOption::Create)
        .expect("create lookup");
    assert_eq!(created, Some(PathBuf::from("/home/fake/.config")));
    assert_eq!(
        pal.special_dir(SpecialFolder::Config).expect("lookup"),
        Some(PathBuf::from("/home/fake/.config"))
    );
}

#[test]
fn unmapped_special_folder_is_none_in_every_mode() {
    let pal = FakePal::new();
    for option in [
        SpecialDirOption::VerifyExists,
        SpecialDirOption::DoNotVerify,
        SpecialDirOption::Create,
    ] {
        assert_eq!(
            pal.special_dir_with(SpecialFolder::Videos, option)
                .expect("lookup"),
            None
        );
    }
}

#[test]
fn fixed_locations_have_sensible_defaults() {
    let pal = FakePal::new();

    assert_eq!(pal.home_dir(), Some(PathBuf::from("/home/fake")));
    assert_eq!(pal.temp_dir(), PathBuf::from("/tmp"));
    assert_eq!(pal.system_dir(), PathBuf::from("/usr/bin"));
}

#[test]
fn logical_drives_are_sorted_and_deduplicated() {
    let pal = FakePal::new();
    pal.set_drives(vec![
        PathBuf::from("/data"),
        PathBuf::from("/"),
        PathBuf::from("/data"),
    ]);

    assert_eq!(
        pal.logical_drives().expect("drives"),
        vec![PathBuf::from("/"), PathBuf::from("/data")]
    );
}

#[test]
fn args_start_with_the_executable_path() {
    let pal = FakePal::new();
    pal.set_args(vec![
        "/opt/tool/bin/run".to_string(),
        "--fast".to_string(),
        "two words".to_string(),
    ]);

    let args = pal.args().expect("args");
    assert_eq!(args[0], "/opt/tool/bin/run");
    assert_eq!(
        pal.current_exe().expect("exe"),
        PathBuf::from("/opt/tool/bin/run")
    );
    assert_eq!(
        pal.command_line().expect("command line"),
        "/opt/tool/bin/run --fast \"two words\""
    );
}

#[test]
fn process_and_thread_identity_are_reported() {
    let pal = FakePal::new();

    assert_eq!(pal.process_id(), 4242);
    assert_eq!(pal.thread_id(), 4243);
}

fn shutdown_guard(pal: &dyn HostPal) {
    if pal.has_shutdown_started() {
        pal.exit(7);
    }
}

#[test]
fn exit_requested_by_guarded_code_is_observable() {
    let pal = FakePal::new();
    pal.set_shutdown_started(true);

    let outcome = catch_unwind(AssertUnwindSafe(|| shutdown_guard(&pal)));

    assert!(outcome.is_err());
    assert!(pal.has_operation(|op| matches!(op, Operation::Exit { code: 7 })));
}

#[test]
fn exit_not_taken_when_guard_passes() {
    let pal = FakePal::new();

    shutdown_guard(&pal);

    assert!(!pal.has_operation(|op| matches!(op, Operation::Exit { .. })));
}

#[test]
fn exit_code_staging_round_trips_and_records() {
    let pal = FakePal::new();

    pal.set_exit_code(5);

    assert_eq!(pal.exit_code(), 5);
    assert!(pal.has_operation(|op| matches!(op, Operation::SetExitCode { code: 5 })));
}

#[test]
fn fail_fast_records_without_a_normal_exit() {
    let pal = FakePal::new();
    pal.set_exit_code(9);

    let outcome = catch_unwind(AssertUnwindSafe(|| {
        pal.fail_fast("invariant broken", None)
    }));

    assert!(outcome.is_err());
    assert!(pal.has_operation(
        |op| matches!(op, Operation::FailFast { message, .. } if message == "invariant broken")
    ));
    assert!(!pal.has_operation(|op| matches!(op, Operation::Exit { .. })));
}

#[test]
fn expansion_substitutes_known_and_keeps_unknown() {
    let pal = FakePal::new();
    pal.seed_var("COLOR", "teal", EnvScope::Process);

    assert_eq!(pal.expand("paint it $COLOR"), "paint it teal");
    assert_eq!(pal.expand("paint it ${COLOR}ish"), "paint it tealish");
    assert_eq!(pal.expand("keep $UNKNOWN_TOKEN"), "keep $UNKNOWN_TOKEN");
    assert_eq!(pal.expand("plain text"), "plain text");
}

#[test]
fn expansion_reads_process_scope_only() {
    let pal = FakePal::new();
    pal.seed_var("SHADE", "machine-wide", EnvScope::Machine);

    assert_eq!(pal.expand("$SHADE"), "$SHADE");

    pal.seed_var("SHADE", "local", EnvScope::Process);
    assert_eq!(pal.expand("$SHADE"), "local");
}
