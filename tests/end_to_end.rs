use stepsum::{
    extract_road_name, ngram_counts, parse_records, rank_steps, rank_steps_detailed, render,
    summarize, summarize_batch, Corpus, Domain, DomainReport, FrequencyAnalyzer, NoopObserver,
    PlanReport, StageTimingObserver, SummarizerConfig, SummaryError,
};

fn denver_routes() -> Corpus {
    let common_start = [
        "Head east",
        "Turn left onto Logan Street",
        "Turn left",
        "Turn left",
        "Turn right onto East 8th Avenue",
        "Turn left onto Grant Street",
        "Turn left onto East Speer Boulevard",
        "Turn right onto Logan Street",
        "Turn right onto East 3rd Avenue",
        "Turn left onto Broadway",
        "Turn left",
        "Keep left",
    ];
    let common_end = [
        "Turn left onto North 31st Street",
        "Keep right",
        "Turn sharp right onto Cave of the Winds Road",
        "Keep left onto Cave of the Winds Road",
        "Turn left",
        "Arrive at your destination, on the right",
    ];

    let first: Vec<&str> = common_start
        .iter()
        .chain(&["Keep left onto I 25 Express Lane, I 25 Express", "Keep right", "Keep right"])
        .chain(&common_end)
        .copied()
        .collect();
    let second: Vec<&str> = common_start
        .iter()
        .chain(&[
            "Keep right",
            "Keep left",
            "Keep right",
            "Keep right",
            "Keep right",
            "Turn left",
            "Keep left",
            "Keep right",
            "Keep right",
        ])
        .chain(&common_end)
        .copied()
        .collect();
    let third: Vec<&str> = common_start
        .iter()
        .chain(&[
            "Keep right",
            "Keep left",
            "Keep right",
            "Keep right",
            "Keep right",
            "Turn left",
            "Turn left onto North Pinery Parkway",
            "Continue straight onto North Pinery Parkway",
            "Turn left onto South Parker Road, CO 83",
            "Keep left",
            "Keep right",
            "Keep right",
        ])
        .chain(&common_end)
        .copied()
        .collect();

    Corpus::from_slices(&[first, second, third]).unwrap()
}

fn go_stop() -> Corpus {
    Corpus::from_slices(&[
        vec!["go", "go", "stop"],
        vec!["go", "stop"],
        vec!["stop", "stop", "go", "go"],
    ])
    .unwrap()
}

#[test]
fn test_route_corpus_shape() {
    assert_eq!(denver_routes().lengths(), vec![21, 27, 30]);
}

#[test]
fn test_route_digest() {
    let digest = summarize(
        &denver_routes(),
        Domain::Route,
        &SummarizerConfig::default(),
        &mut NoopObserver,
    )
    .unwrap();

    assert_eq!(
        digest.synopsis,
        "Analysis of 3 travel routes reveals an average of 26.00 steps per route. \
         Among these routes, the must-take roads are Logan Street (6 times), Cave of (6 times), \
         East 8th (3 times), Grant Street (3 times), East Speer (3 times). \
         The route with the least number of steps is Route: 1."
    );

    assert_eq!(digest.ranking.num_nodes, 19);
    assert_eq!(digest.ranking.num_edges, 45);
    assert!(digest.ranking.converged);
    assert_eq!(
        digest.top_steps(6),
        vec![
            "Turn left",
            "Turn left onto Logan Street",
            "Turn right onto Logan Street",
            "Turn left onto North 31st Street",
            "Turn left onto Grant Street",
            "Keep left",
        ]
    );
}

#[test]
fn test_ranking_is_deterministic_and_normalized() {
    let routes = denver_routes();
    let config = SummarizerConfig::default();

    let first = rank_steps(routes.steps(), &config).unwrap();
    let second = rank_steps(routes.steps(), &config).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 6);

    let ranking = rank_steps_detailed(routes.steps(), &config).unwrap();
    let sum: f64 = ranking.ranked.iter().map(|r| r.score).sum();
    assert!((sum - 1.0).abs() < 1e-9);
}

#[test]
fn test_go_stop_bigrams_stay_within_sequences() {
    let corpus = go_stop();
    let counts = ngram_counts(&corpus, 2);
    let go_go = ["go".to_string(), "go".to_string()];
    assert_eq!(counts.count(&&go_go[..]), 2);

    let analyzer = FrequencyAnalyzer::with_config(SummarizerConfig::default().with_ngram_size(2)).unwrap();
    let view = analyzer.analyze_text_view(&corpus);
    assert_eq!(view.ngrams[0], (vec!["go".to_string(), "go".to_string()], 2));
}

#[test]
fn test_trigram_never_spans_boundary() {
    let corpus = Corpus::from_slices(&[vec!["a", "b"], vec!["c", "d", "e"]]).unwrap();
    let counts = ngram_counts(&corpus, 3);
    assert_eq!(counts.len(), 1);
    assert_eq!(
        counts.most_common(1)[0].0,
        &["c".to_string(), "d".to_string(), "e".to_string()][..]
    );
}

#[test]
fn test_plan_view_range_and_shortest() {
    let corpus = go_stop();
    let report = FrequencyAnalyzer::new().analyze_plan_view(&corpus).unwrap();

    let [min, max] = report.step_range;
    assert_eq!((min, max), (2, 4));
    assert!(report.avg_steps >= min as f64 && report.avg_steps <= max as f64);
    assert_eq!(corpus.sequences()[report.shortest_index].len(), min);
}

#[test]
fn test_road_patterns_in_order() {
    let road = extract_road_name("Turn right onto East 8th Avenue").unwrap();
    assert!(road.contains("East 8th") || road.contains("East Avenue"));
    assert_eq!(extract_road_name("Keep left"), None);
}

#[test]
fn test_plan_render_joins_action_sequence() {
    let report = PlanReport {
        total_items: 2,
        avg_steps: 3.5,
        step_range: [3, 4],
        most_common_items: vec![("a".to_string(), 4)],
        most_common_secondary: vec![],
        shortest_index: 0,
        most_common_action_sequence: Some((
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            4,
        )),
    };
    let text = render(&DomainReport::Plan(report)).unwrap();
    assert!(text.contains("a -> b -> c"));
}

#[test]
fn test_empty_corpus_is_rejected() {
    assert_eq!(Corpus::new(vec![]).unwrap_err(), SummaryError::EmptyCorpus);
    assert_eq!(
        rank_steps(Vec::<String>::new(), &SummarizerConfig::default()).unwrap_err(),
        SummaryError::EmptyGraph
    );
}

#[test]
fn test_plan_records_to_digest() {
    let records = [
        "['(unstack b a)', '(put-down b)', '(pick-up a)', '(stack a b)']",
        "['(pick-up a)', '(stack a b)']",
        r#"["(unstack b a)", "(put-down b)", "(pick-up a)", "(stack a b)", "(pick-up c)"]"#,
    ];
    let corpus = parse_records(Domain::Plan, &records).unwrap();
    let mut observer = StageTimingObserver::new();
    let digest = summarize(&corpus, Domain::Plan, &SummarizerConfig::default(), &mut observer).unwrap();

    assert!(digest.synopsis.starts_with("Analysis of 3 plans reveals an average of 3.67 steps per plan"));
    assert!(digest
        .synopsis
        .contains("The most common action sequence is: unstack b a -> put-down b -> pick-up a."));
    assert!(digest.synopsis.contains("The plan with the least number of steps is Plan: 2."));
    assert_eq!(observer.stages().len(), 6);

    let json = serde_json::to_value(&digest.report).unwrap();
    assert_eq!(json["domain"], "plan");
    assert_eq!(json["report"]["total_items"], 3);
}

#[test]
fn test_batch_keeps_order() {
    let jobs = vec![(denver_routes(), Domain::Route), (go_stop(), Domain::Recipe)];
    let results = summarize_batch(&jobs, &SummarizerConfig::default());

    assert_eq!(results[0].as_ref().unwrap().domain, Domain::Route);
    assert_eq!(results[1].as_ref().unwrap().domain, Domain::Recipe);
}

#[test]
fn test_crlf_recipe_records_summarize() {
    let records = [
        "Preheat oven\r\n\r\nMix flour and sugar\r\nBake cake",
        "Mix eggs\r\nBake bread",
    ];
    let corpus = parse_records(Domain::Recipe, &records).unwrap();
    assert_eq!(corpus.lengths(), vec![4, 2]);
    assert!(corpus.steps().all(|step| !step.contains('\r')));

    let digest = summarize(&corpus, Domain::Recipe, &SummarizerConfig::default(), &mut NoopObserver).unwrap();
    assert!(digest
        .synopsis
        .starts_with("Analysis of 2 recipes reveals an average of 3.00 steps per recipe"));
    assert!(digest.synopsis.contains("Mix (2 times), Bake (2 times)"));
    assert!(digest.synopsis.ends_with("Recipe: 2."));
}
