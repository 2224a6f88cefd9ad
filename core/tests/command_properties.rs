use command_match_core::{
    CommandError, CommandSpec, FlagCommand, ParsedValues, RootCommand, Value, ValueCommand,
    ValueKind,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn count(optional: bool) -> ValueCommand {
    ValueCommand::new("-c", "Amount of pings to send", ValueKind::Integer, r"\d+", optional)
        .unwrap()
}

fn ping_spec() -> CommandSpec {
    CommandSpec::new("ping")
        .with_help("send an ICMP request")
        .no_args()
        .with_child(
            CommandSpec::new("-c")
                .with_help("how many to send")
                .with_value_type(ValueKind::Integer)
                .with_pattern(r"\d+")
                .optional(),
        )
        .with_child(
            CommandSpec::new("-i")
                .with_help("interval in seconds")
                .with_value_type(ValueKind::Double)
                .with_pattern(r"\d+(\.\d+)?")
                .with_default("1.0")
                .optional(),
        )
        .with_child(CommandSpec::new("-A").with_help("audible ping").no_args())
}

// ---------------------------------------------------------------------------
// Leaf behavior
// ---------------------------------------------------------------------------

#[test]
fn flag_boundaries() {
    let flag = FlagCommand::new("-A", "audible");
    for input in ["", "-A", "-A x", "x -A", "-AB"] {
        assert!(flag.validate(input), "flag should validate {input:?}");
    }
    assert_eq!(flag.strip("-AB"), "-AB");
    assert_eq!(flag.strip("-A x"), " x");
    assert_eq!(flag.strip("x -A"), "x ");
    assert_eq!(flag.strip("-A"), "");
    assert_eq!(flag.strip(""), "");
}

#[test]
fn mandatory_count() {
    let cmd = count(false);
    assert!(cmd.validate("-c 14"));
    assert!(!cmd.validate("-c ab14c"));
    assert!(!cmd.validate("-c"));
    assert!(!cmd.validate(""));

    let values = cmd.parse("ping -c 3 -A 1.1.1.1", ParsedValues::new()).unwrap();
    let expected: ParsedValues = [("-c", "3")].into_iter().collect();
    assert_eq!(values, expected);
}

#[test]
fn optional_count() {
    let cmd = count(true);
    assert!(cmd.validate(""));
    assert!(cmd.validate("ping -n 3"));
}

// ---------------------------------------------------------------------------
// Roots and trees
// ---------------------------------------------------------------------------

#[test]
fn bare_root() {
    let root = RootCommand::named("ping", "send an ICMP request");
    assert!(root.validate("ping"));
    assert!(!root.validate("asdfasdf"));
    assert_eq!(root.parse("ping").unwrap(), ParsedValues::new());
}

#[test]
fn root_help_text() {
    let child = |name: &str, help: &str, kind: ValueKind| {
        ValueCommand::mandatory(name, help, kind, r"\d").unwrap()
    };
    let root = RootCommand::named("ping", "send an ICMP request")
        .with_child(child("-c", "how many to send", ValueKind::Integer))
        .unwrap()
        .with_child(child("-d", "d flag help text", ValueKind::Boolean))
        .unwrap()
        .with_child(child("-e", "e flag help text", ValueKind::Boolean))
        .unwrap();
    assert_eq!(
        root.help_text(),
        "ping: send an ICMP request\n-c: how many to send\n-d: d flag help text\n-e: e flag help text"
    );
}

#[test]
fn duplicate_children() {
    let result = RootCommand::named("ping", "send an ICMP request")
        .with_child(count(false))
        .unwrap()
        .with_child(count(true));
    assert!(matches!(result, Err(CommandError::DuplicateCommandName(_))));
}

#[test]
fn full_tree_parse_and_typed_access() {
    let tree = ping_spec().build().unwrap();
    let input = "ping -c 4 -A 10.0.0.1";
    assert!(tree.validate(input));

    let values = tree.parse(input).unwrap();
    assert_eq!(values.get("-c"), Some("4"));
    assert_eq!(values.get("-i"), None);
    assert!(!values.contains("-A"));

    assert_eq!(tree.typed_value(&values, "-c").unwrap(), Some(Value::Integer(4)));
    assert_eq!(tree.typed_value(&values, "-i").unwrap(), None);

    let values = tree.parse("ping -i -A 10.0.0.1").unwrap();
    assert_eq!(values.get("-i"), Some("1.0"));
    assert!(!tree.validate("ping -i fast -A 10.0.0.1"));

    let values = tree.parse("ping -i 0.5").unwrap();
    assert_eq!(
        tree.typed_value(&values, "-i").unwrap().and_then(|v| v.as_f64()),
        Some(0.5)
    );

    let values = tree.parse("ping 10.0.0.1 -i").unwrap();
    assert_eq!(values.get("-i"), Some("1.0"));
}

#[test]
fn full_tree_strip() {
    let tree = ping_spec().build().unwrap();
    assert_eq!(tree.strip("ping -c 3 -A 192.168.1.1"), "    192.168.1.1");
}

#[test]
fn parse_failure_returns_no_values() {
    let tree = ping_spec().build().unwrap();
    assert!(matches!(
        tree.parse("pong -c 3"),
        Err(CommandError::InvalidInput { .. })
    ));
}

#[test]
fn coercion_errors_surface_on_access() {
    let tree = ping_spec().build().unwrap();
    let values: ParsedValues = [("-c", "abc")].into_iter().collect();
    assert!(matches!(
        tree.typed_value(&values, "-c"),
        Err(CommandError::ValueCoercionFailure { .. })
    ));

    let tree = CommandSpec::new("remind")
        .with_value_type(ValueKind::from_tag("date"))
        .build()
        .unwrap();
    let values = tree.parse("remind tomorrow").unwrap();
    assert_eq!(values.get("remind"), Some("tomorrow"));
    assert!(matches!(
        tree.typed_value(&values, "remind"),
        Err(CommandError::UnsupportedValueType { .. })
    ));
}
