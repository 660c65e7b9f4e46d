use pncl::data::chart::DatasetData;
use pncl::sink;
use pncl::{Aggregator, GridSpec, PlotArgs, PlotError, PlotKind};
use serde_json::{json, Value};

fn aggregator() -> (Aggregator, sink::Inbox) {
    let (outbox, inbox) = sink::channel();
    let agg = Aggregator::new(GridSpec::default(), 300, outbox).unwrap();
    (agg, inbox)
}

fn dataset_len(data: &DatasetData) -> usize {
    match data {
        DatasetData::Points(points) => points.len(),
        DatasetData::Values(values) => values.len(),
    }
}

#[test]
fn refresh_keeps_input_lengths() {
    let (mut agg, _inbox) = aggregator();
    for &kind in PlotKind::all() {
        let idx = agg.add(kind, PlotArgs::y([1.0, 2.0])).unwrap();
        agg.refresh(
            idx,
            PlotArgs::xy([1.0, 2.0, 3.0, 4.0], [5.0, 6.0, 7.0, 8.0]).with_series([0.0, 0.0, 1.0, 1.0]),
        )
        .unwrap();
        let desc = agg.description(idx).unwrap();
        assert_eq!(desc.data.datasets.len(), 2, "{kind:?}");
        for ds in &desc.data.datasets {
            assert_eq!(dataset_len(&ds.data), 4, "{kind:?}");
        }
    }
}

#[test]
fn single_series_is_plotted_against_its_index() {
    let (mut agg, _inbox) = aggregator();
    let bar = agg.add(PlotKind::Bar, PlotArgs::y([3.0, 1.0, 4.0])).unwrap();
    let json = serde_json::to_value(agg.description(bar).unwrap()).unwrap();
    assert_eq!(json["data"]["labels"], json!([0.0, 1.0, 2.0]));
    assert_eq!(json["data"]["datasets"][0]["data"], json!([3.0, 1.0, 4.0]));

    let line = agg.add(PlotKind::Line, PlotArgs::y([3.0, 1.0])).unwrap();
    let json = serde_json::to_value(agg.description(line).unwrap()).unwrap();
    assert_eq!(
        json["data"]["datasets"][0]["data"],
        json!([{"x": 0.0, "y": 3.0}, {"x": 1.0, "y": 1.0}])
    );
}

#[test]
fn push_arity_is_checked_before_mutation() {
    let (mut agg, inbox) = aggregator();
    let two = agg
        .add(PlotKind::Line, PlotArgs::xy([0.0, 1.0], [1.0, 2.0]).with_series([3.0, 4.0]))
        .unwrap();
    let one = agg.add(PlotKind::Line, PlotArgs::y([1.0, 2.0])).unwrap();
    let before = agg.snapshot().clone();
    let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
    rt.block_on(inbox.drain_events());

    assert_eq!(
        agg.push(two, [5.0]),
        Err(PlotError::ArgumentCount { got: 1, series: 2 })
    );
    assert_eq!(
        agg.push(two, [2.0, 5.0]),
        Err(PlotError::ArgumentCount { got: 2, series: 2 })
    );
    assert!(agg.push(one, [2.0, 5.0, 6.0]).is_err());
    assert!(agg.push(one, Vec::<f64>::new()).is_err());
    assert!(agg.push(two, [2.0, f64::NAN, 1.0]).is_err());
    assert_eq!(agg.snapshot(), &before);
    assert!(rt.block_on(inbox.drain_events()).is_empty());

    agg.push(two, [2.0, 5.0, 6.0]).unwrap();
    agg.push(one, [7.0]).unwrap();
    assert_eq!(agg.plot(two).unwrap().len(), 3);
    assert_eq!(agg.plot(one).unwrap().x().values().last().and_then(|d| d.as_f64()), Some(2.0));
}

#[test]
fn push_emits_only_the_trailing_point() {
    let (mut agg, inbox) = aggregator();
    let x: Vec<f64> = (0..10).map(f64::from).collect();
    let y: Vec<f64> = x.iter().map(|v| v * v).collect();
    let idx = agg.add(PlotKind::Line, PlotArgs::xy(x, y)).unwrap();
    agg.push(idx, [10.0, 100.0]).unwrap();

    let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
    let events = rt.block_on(inbox.drain_events());
    assert_eq!(events.len(), 2);
    let push: Value = serde_json::from_str(&events[1]).unwrap();
    assert_eq!(push["type"], "push");
    assert_eq!(push["idx"], 0);
    assert_eq!(push["data"]["datasets"], json!([{"data": {"x": 10.0, "y": 100.0}}]));
    assert_eq!(agg.plot(idx).unwrap().len(), 11);

    let config: Value = serde_json::from_str(&inbox.latest_config()).unwrap();
    assert_eq!(config["plots"][0]["data"]["datasets"][0]["data"].as_array().unwrap().len(), 11);
}

#[test]
fn pie_push_carries_new_slice_color() {
    let (mut agg, inbox) = aggregator();
    let idx = agg
        .add(PlotKind::Pie, PlotArgs::xy(["a", "b"], [1.0, 2.0]))
        .unwrap();
    agg.push(idx, [pncl::Datum::from("c"), pncl::Datum::from(3.0)]).unwrap();

    let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
    let events = rt.block_on(inbox.drain_events());
    let push: Value = serde_json::from_str(&events[1]).unwrap();
    assert_eq!(push["data"]["label"], "c");
    assert_eq!(push["data"]["datasets"][0]["data"], json!(3.0));
    assert_eq!(push["data"]["datasets"][0]["borderColor"], "rgba(75, 192, 75, 1)");
    assert_eq!(push["data"]["datasets"][0]["backgroundColor"], "rgba(75, 192, 75, 0.2)");
}

#[test]
fn invalid_arguments_are_rejected() {
    let (mut agg, _inbox) = aggregator();
    assert_eq!(agg.add(PlotKind::Line, PlotArgs::new()), Err(PlotError::NoSeries));
    assert!(matches!(
        agg.add(PlotKind::Line, PlotArgs::xy([1.0, 2.0], [1.0])),
        Err(PlotError::LengthMismatch { .. })
    ));
    assert!(matches!(
        agg.add(PlotKind::Bar, PlotArgs::xy([1.0], ["a"])),
        Err(PlotError::InvalidSeries { index: 1, .. })
    ));
    assert!(matches!(
        agg.add(PlotKind::Bar, PlotArgs::y([1.0]).with_labels(["a", "b"])),
        Err(PlotError::LabelCount { labels: 2, series: 1 })
    ));
    assert!(agg.is_empty());
}

#[test]
fn json_arguments_accept_numbers_and_categories() {
    let args = PlotArgs::from_json(&[json!(["mon", "tue"]), json!([1, 2.5])]).unwrap();
    let (mut agg, _inbox) = aggregator();
    let idx = agg.add(PlotKind::Bar, args).unwrap();
    assert_eq!(agg.plot(idx).unwrap().len(), 2);
    assert!(PlotArgs::from_json(&[json!([[1], [2]])]).is_err());
    assert!(PlotArgs::from_json(&[json!(3)]).is_err());
}
