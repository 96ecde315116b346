use std::collections::HashMap;

use stem::{Filter, Set, Template, TemplateError, ToValue, Value, from_json};

struct Case {
    name: &'static str,
    tmpl: &'static str,
    data: Value,
    json: &'static str,
    want: &'static str,
}

fn map(entries: Vec<(&str, Value)>) -> Value {
    Value::Map(entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
}

fn cases() -> Vec<Case> {
    vec![
        Case {
            name: "ifdef",
            tmpl: "0{{+a}}1{{/a}}2",
            data: map(vec![("a", "".to_value())]),
            json: r#"{"a": ""}"#,
            want: "012",
        },
        Case {
            name: "ifndef",
            tmpl: "0{{-a}}1{{/a}}2",
            data: map(vec![("a", "".to_value())]),
            json: r#"{"a": ""}"#,
            want: "02",
        },
        Case {
            name: "print",
            tmpl: "{{*a}}",
            data: map(vec![("a", "0".to_value())]),
            json: r#"{"a": "0"}"#,
            want: "0",
        },
        Case {
            name: "object",
            tmpl: "{{$a}}{{*b}}{{/a}}",
            data: map(vec![("a", map(vec![("b", "0".to_value())]))]),
            json: r#"{"a": {"b": "0"}}"#,
            want: "0",
        },
        Case {
            name: "object nest",
            tmpl: "{{$a}}{{$a}}{{*b}}{{/a}}{{/a}}",
            data: map(vec![("a", map(vec![("b", "0".to_value())]))]),
            json: r#"{"a": {"b": "0"}}"#,
            want: "0",
        },
        Case {
            name: "array object",
            tmpl: "{{#a}}{{*b}}{{/a}}",
            data: map(vec![(
                "a",
                Value::List(vec![
                    map(vec![("b", "0".to_value())]),
                    map(vec![("b", "1".to_value())]),
                ]),
            )]),
            json: r#"{"a": [{"b": "0"}, {"b": "1"}]}"#,
            want: "01",
        },
        Case {
            name: "array",
            tmpl: "{{#a}}{{*}}{{/a}}",
            data: map(vec![("a", vec![0i32, 1].to_value())]),
            json: r#"{"a": [0, 1]}"#,
            want: "01",
        },
    ]
}

#[test]
fn test_template() {
    for case in cases() {
        let tmpl = Template::parse(case.tmpl).expect("couldn't parse template");
        let mut got = Vec::new();
        tmpl.execute(&mut got, &case.data)
            .expect("couldn't execute template");
        assert_eq!(String::from_utf8(got).unwrap(), case.want, "test {:?}", case.name);
    }
}

#[test]
fn test_template_json() {
    for case in cases() {
        let tmpl = Template::parse(case.tmpl).expect("couldn't parse template");
        let mut got = Vec::new();
        tmpl.execute_json(&mut got, case.json)
            .expect("couldn't execute template");
        assert_eq!(String::from_utf8(got).unwrap(), case.want, "test {:?} JSON", case.name);
    }
}

#[test]
fn test_native_and_json_data_agree() {
    for case in cases() {
        let json = from_json(case.json).unwrap();
        assert!(stem::string_equal(&case.data, &json), "test {:?}", case.name);
    }
}

#[test]
fn test_template_include() {
    let set = Set::new();
    set.add(Template::parse("0{{>bar}}2").unwrap().with_name("foo"));
    set.add(Template::parse("1").unwrap().with_name("bar"));

    let mut got = Vec::new();
    set.execute(&mut got, "foo", &Value::Map(HashMap::new()))
        .unwrap();
    assert_eq!(got, b"012");
}

#[test]
fn test_unresolved_includes_are_deleted() {
    let with_includes = "a{{>x}}b{{#l}}{{>y}}{{*}}{{/l}}{{>z}}c";
    let without = "ab{{#l}}{{*}}{{/l}}c";
    let data = from_json(r#"{"l": [1, 2]}"#).unwrap();

    let set = Set::new();
    set.add(Template::parse_named("t", with_includes).unwrap());
    let got = set.render("t", &data).unwrap();
    let want = Template::parse(without).unwrap().render(&data).unwrap();
    assert_eq!(got, want);
    assert_eq!(got, "ab12c");
}

#[test]
fn test_delimiter_change_renders() {
    let tmpl = Template::parse("{{*a}}{{=[[ ]]}}[[*b]]{{*a}}").unwrap();
    let data = HashMap::from([("a", "A"), ("b", "B")]);
    assert_eq!(tmpl.render(&data).unwrap(), "AB{{*a}}");
}

#[test]
fn test_parse_errors() {
    assert!(matches!(
        Template::parse("{{#a}}{{*b}}"),
        Err(TemplateError::UnclosedScope { .. })
    ));
    assert!(matches!(
        Template::parse("{{/a}}"),
        Err(TemplateError::UnopenedScope { .. })
    ));
    assert!(matches!(
        Template::parse("{{#a}}{{/b}}"),
        Err(TemplateError::UnmatchedTag { .. })
    ));
    assert!(matches!(
        Template::parse("{{%a}}"),
        Err(TemplateError::UnrecognizedTag { .. })
    ));
    assert!(matches!(
        Template::parse("{{*a"),
        Err(TemplateError::IncompleteTag { .. })
    ));
    assert!(matches!(
        Template::parse("{{=[[}}"),
        Err(TemplateError::MalformedTag { .. })
    ));
    assert!(matches!(
        Template::parse(&"{{#a}}".repeat(33)),
        Err(TemplateError::DepthLimitExceeded { .. })
    ));
}

#[test]
fn test_filter() {
    let tests = [
        ("blank lines", Filter::NO_BLANK_LINES, "foo\n\nbar", "foo\nbar"),
        ("left space", Filter::TRIM_LEFT_SPACE, "foo\n bar", "foo\nbar"),
        ("right space", Filter::TRIM_RIGHT_SPACE, "foo \nbar", "foo\nbar"),
    ];
    for (name, flag, tmpl, want) in tests {
        let mut tmpl = Template::parse(tmpl).expect("couldn't parse template");
        tmpl.filter(flag);
        assert_eq!(tmpl.render(&Value::Map(HashMap::new())).unwrap(), want, "test {:?}", name);
    }
}

#[test]
fn test_filter_is_idempotent() {
    let src = "a  \n\n\t b{{+x}}\n\n  c \n{{/x}}";
    let once = Template::parse(src).unwrap().filtered(Filter::all());
    let twice = once.clone().filtered(Filter::all());
    assert_eq!(once, twice);
}

#[test]
fn test_shadowed_array() {
    // The inner scalar `a` hides the outer list, so the inner section is empty.
    let tmpl = Template::parse("{{$o}}[{{#a}}x{{/a}}]{{/o}}{{#a}}y{{/a}}").unwrap();
    let data = from_json(r#"{"a": [1, 2], "o": {"a": "scalar"}}"#).unwrap();
    assert_eq!(tmpl.render(&data).unwrap(), "[]yy");
}
