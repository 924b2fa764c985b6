use assert_float_eq::{
    afe_abs,
    afe_absolute_error_msg,
    afe_is_absolute_eq,
    assert_float_absolute_eq,
};
use calc_core::{
    classify::{classify, Classified},
    eval::Evaluation,
    graph::point::{CanvasPoint, GraphPoint},
    history::{first_segment, History, ERR, GRAPH, SEPARATOR},
    persist::MemoryStore,
    variables::Variables,
    Calculator,
    Config,
    Event,
    PreviewKind,
};
use pretty_assertions::assert_eq;

fn calculator() -> Calculator<MemoryStore> {
    Calculator::new(Config::default(), MemoryStore::new())
}

fn submit(calc: &mut Calculator<MemoryStore>, text: &str) {
    calc.handle(Event::Submit(text.to_string()));
}

fn ids(calc: &Calculator<MemoryStore>) -> Vec<u64> {
    calc.history().entries().iter().map(|entry| entry.id).collect()
}

#[test]
fn plain_arithmetic_matches_the_evaluator() {
    let (vars, history) = (Variables::new(), History::new(100));
    for (input, expected) in [
        ("1 + 2 * 3", 7.0),
        ("2^10", 1024.0),
        ("10 / 4", 2.5),
        ("-(3 - 5)", 2.0),
        ("7 % 4", 3.0),
        ("sqrt(2)^2", 2.0000000000000004),
    ] {
        let classified = classify(input, &vars, &history);
        assert!(matches!(classified, Classified::Plain(_)), "{} is not plain", input);
        assert_eq!(classified.value(), Evaluation::of(input).finite());
        assert_eq!(classified.value(), Some(expected));
    }

    let mut calc = calculator();
    submit(&mut calc, "sqrt(2)^2");
    assert_eq!(calc.history().latest().unwrap().result, "2");
}

#[test]
fn assignment_then_use() {
    let mut calc = calculator();
    submit(&mut calc, "a=3");
    submit(&mut calc, "a+1");
    assert_eq!(calc.history().latest().unwrap().result, "4");

    submit(&mut calc, "5*5");
    submit(&mut calc, "y = a * x");
    assert_eq!(calc.variables().get('a'), Some(3.0));
    assert_eq!(calc.store().get("calculator-variables"), Some(r#"{"a":3.0}"#));
}

#[test]
fn ids_are_sequential_across_variable_clears() {
    let mut calc = calculator();
    for i in 0..5 {
        submit(&mut calc, &format!("{} + 1", i));
        calc.handle(Event::ClearVariables);
    }
    assert_eq!(ids(&calc), vec![1, 2, 3, 4, 5]);
}

#[test]
fn history_is_capped() {
    let mut calc = calculator();
    for i in 0..101 {
        submit(&mut calc, &i.to_string());
    }
    assert_eq!(calc.history().len(), 100);
    assert_eq!(calc.history().entries()[0].id, 2);
    assert_eq!(calc.history().latest().unwrap().id, 101);
}

#[test]
fn graph_classification_and_sampling() {
    let (vars, history) = (Variables::new(), History::new(100));
    assert!(matches!(classify("y = x^2", &vars, &history), Classified::Graph { .. }));

    let mut calc = calculator();
    submit(&mut calc, "y = x^2");
    assert_eq!(calc.history().latest().unwrap().result, GRAPH);

    let function = calc.graph().function().unwrap();
    assert_float_absolute_eq!(function.eval_at(2.0).unwrap(), 4.0);
}

#[test]
fn trig_is_numeric_unless_it_mentions_x() {
    let (vars, history) = (Variables::new(), History::new(100));
    assert!(matches!(classify("sin(30)", &vars, &history), Classified::TrigNumeric(_)));
    assert!(matches!(classify("sin(x)", &vars, &history), Classified::Graph { .. }));
}

#[test]
fn empty_assignment_is_an_error() {
    let mut calc = calculator();
    submit(&mut calc, "b=");
    assert_eq!(calc.history().latest().unwrap().result, ERR);
    assert_eq!(calc.variables().get('b'), None);

    submit(&mut calc, "b = 1/0");
    assert_eq!(calc.history().latest().unwrap().result, ERR);
    assert_eq!(calc.variables().get('b'), None);
}

#[test]
fn recall_round_trip() {
    let mut calc = calculator();
    submit(&mut calc, "1");
    submit(&mut calc, "(1+1)*1");
    submit(&mut calc, "3");

    let mut recalled = Vec::new();
    for _ in 0..3 {
        recalled.push(calc.handle(Event::RecallPrevious).input);
    }
    assert_eq!(recalled, vec!["3", "(1+1)*1", "1"]);

    // past the oldest entry
    assert_eq!(calc.handle(Event::RecallPrevious).input, "1");

    let mut recalled = Vec::new();
    for _ in 0..3 {
        recalled.push(calc.handle(Event::RecallNext).input);
    }
    assert_eq!(recalled, vec!["(1+1)*1", "3", ""]);
    assert_eq!(calc.recall().cursor(), None);
    assert_eq!(calc.preview().kind, PreviewKind::Empty);
}

#[test]
fn commit_resets_recall() {
    let mut calc = calculator();
    submit(&mut calc, "1");
    submit(&mut calc, "2");
    calc.handle(Event::RecallPrevious);
    calc.handle(Event::RecallPrevious);

    let response = calc.handle(Event::Submit("5".to_string()));
    assert_eq!(response.input, "");
    assert_eq!(calc.recall().cursor(), None);
    assert_eq!(calc.handle(Event::RecallPrevious).input, "5");
}

#[test]
fn trace_ends_at_the_result() {
    let mut calc = calculator();
    submit(&mut calc, "(2+3)*4");

    let entry = calc.history().latest().unwrap();
    assert_eq!(first_segment(&entry.expression), "(2+3)*4");

    let last = entry.expression.rsplit(SEPARATOR).next().unwrap();
    let value = Evaluation::of(last).finite().unwrap();
    assert_eq!(calc_core::fmt::format_number(value, 14), entry.result);
}

#[test]
fn answers_refer_to_results() {
    let mut calc = calculator();
    submit(&mut calc, "6 * 7");
    submit(&mut calc, "ans / 2");
    submit(&mut calc, "ans1 - ans2");
    assert_eq!(calc.history().latest().unwrap().result, "21");
}

#[test]
fn zoom_stays_in_range() {
    let mut calc = calculator();
    let events = [Event::ZoomIn, Event::Wheel(-3.0), Event::ZoomOut, Event::Wheel(7.0)];
    for i in 0..200 {
        calc.handle(events[i % events.len()].clone());
        calc.handle(if i < 100 { Event::ZoomIn } else { Event::ZoomOut });
        let zoom = calc.graph().viewport().zoom();
        assert!((0.1..=10.0).contains(&zoom), "zoom {} out of range", zoom);
    }

    calc.handle(Event::PointerDown(CanvasPoint(10.0, 10.0)));
    calc.handle(Event::PointerMove(CanvasPoint(90.0, 50.0)));
    calc.handle(Event::PointerUp);
    calc.handle(Event::ResetZoom);
    assert_eq!(calc.graph().viewport().pan, GraphPoint(0.0, 0.0));
    assert_eq!(calc.graph().viewport().zoom(), 1.0);
}

#[test]
fn new_graph_resets_the_viewport() {
    let mut calc = calculator();
    submit(&mut calc, "y = x");
    calc.handle(Event::ZoomIn);
    calc.handle(Event::PointerDown(CanvasPoint(0.0, 0.0)));
    calc.handle(Event::PointerMove(CanvasPoint(30.0, 30.0)));
    calc.handle(Event::PointerUp);

    calc.handle(Event::TextChanged("y = 2x".to_string()));
    assert_eq!(calc.graph().body(), Some("2x"));
    assert_eq!(calc.graph().viewport().zoom(), 1.0);
    assert_eq!(calc.graph().viewport().pan, GraphPoint(0.0, 0.0));
}

#[test]
fn hover_reports_the_function_value() {
    let mut calc = calculator();
    calc.handle(Event::Resize(400, 300));
    submit(&mut calc, "y = 1/x");

    // column 200 of 400 is x = 0
    calc.handle(Event::PointerMove(CanvasPoint(200.0, 150.0)));
    assert_eq!(calc.graph().hovered(), None);

    calc.handle(Event::PointerMove(CanvasPoint(300.0, 150.0)));
    let point = calc.graph().hovered().unwrap();
    assert_float_absolute_eq!(point.0, 5.0);
    assert_float_absolute_eq!(point.1, 0.2);

    calc.handle(Event::PointerLeave);
    assert_eq!(calc.graph().hovered(), None);
}

#[test]
fn state_survives_a_restart() {
    let mut calc = calculator();
    submit(&mut calc, "c = 2");
    submit(&mut calc, "c^3");
    let store = calc.store().clone();

    let mut calc = Calculator::new(Config::default(), store);
    assert_eq!(ids(&calc), vec![1, 2]);
    submit(&mut calc, "ans + c");
    assert_eq!(calc.history().latest().unwrap().result, "10");
    assert_eq!(calc.history().latest().unwrap().id, 3);
}

#[test]
fn deeply_nested_input_is_an_error() {
    let mut calc = calculator();
    let within = format!("{}2{}", "(".repeat(100), ")".repeat(100));
    assert_eq!(calc.handle(Event::TextChanged(within)).preview.value, "2");

    for input in [
        format!("{}1{}", "(".repeat(500), ")".repeat(500)),
        format!("{}1{}", "(".repeat(20_000), ")".repeat(20_000)),
        format!("{}1", "-".repeat(20_000)),
        vec!["1"; 5_000].join("+"),
    ] {
        let response = calc.handle(Event::TextChanged(input.clone()));
        assert_eq!(response.preview.kind, PreviewKind::Error);

        let response = calc.handle(Event::Submit(input));
        assert!(response.failure.is_some());
        assert_eq!(calc.history().latest().unwrap().result, ERR);
    }
}

#[test]
fn huge_stored_ids_do_not_overflow() {
    let store = MemoryStore::new().with_blob(
        "calculator-history",
        r#"[{"id": 18446744073709551615, "expression": "1", "result": "1"}]"#,
    );
    let mut calc = Calculator::new(Config::default(), store);
    submit(&mut calc, "2");
    assert_eq!(ids(&calc), vec![1, 2]);
}
