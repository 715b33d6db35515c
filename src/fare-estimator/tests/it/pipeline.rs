use crate::helper::{TestHelper, collect, testdata};
use fare_estimator::{
    CsvLoader, Error, FareCalculator, PricingEngine, TripPricer, UnrealisticSpeed,
    generate_batches, startup::App,
};

fn engine(helper: &TestHelper) -> PricingEngine {
    let settings = &helper.settings;
    let pricer = TripPricer::new(
        Box::new(CsvLoader),
        UnrealisticSpeed::new(settings.fare.max_speed_kmh),
        FareCalculator::new(settings.fare.clone(), settings.timezone),
    );
    PricingEngine::new(pricer, settings.num_workers, settings.queue_size)
}

#[tokio::test]
async fn test_engine_emits_one_fare_per_batch() {
    let helper = TestHelper::new();

    let (batches, _) = generate_batches(testdata("rides_01.csv"), 2).await.unwrap();
    let mut fares = collect(engine(&helper).run(batches)).await;
    fares.sort_by_key(|f| f.trip_id);

    let rendered: Vec<String> = fares.iter().map(|f| f.to_string()).collect();
    let expected: Vec<String> = (1..=10).map(|id| format!("{id},3.47")).collect();

    assert_eq!(rendered, expected);
}

#[tokio::test]
async fn test_single_worker_prices_everything() {
    let mut helper = TestHelper::new();
    helper.settings.num_workers = 1;
    helper.settings.queue_size = 1;

    let (batches, _) = generate_batches(testdata("rides_01.csv"), 1).await.unwrap();
    let fares = collect(engine(&helper).run(batches)).await;

    assert_eq!(fares.len(), 10);
}

#[tokio::test]
async fn test_app_writes_priced_trips() {
    let helper = TestHelper::new();
    let output = helper.path("fares.csv");

    let written = App::build(&helper.settings)
        .run(testdata("rides_01.csv"), &output)
        .await
        .unwrap();

    assert_eq!(written, 10);

    let expected: Vec<String> = (1..=10).map(|id| format!("{id},3.47")).collect();
    assert_eq!(helper.read_lines(&output).await, expected);
}

#[tokio::test]
async fn test_app_prices_moving_and_idle_trips() {
    let helper = TestHelper::new();
    let dataset = helper
        .write_dataset(
            "rides.csv",
            "1,52.316275,4.678871,1608056422\n\
             1,52.370210,4.535538,1608057742\n\
             2,52.316275,4.678871,1607994000\n\
             2,52.370210,4.535538,1607995320\n\
             3,52.316275,4.678871,1607994000\n\
             3,52.370210,4.535538,1607999400\n",
        )
        .await;
    let output = helper.path("fares.csv");

    App::build(&helper.settings)
        .run(&dataset, &output)
        .await
        .unwrap();

    // Day rate at 18:20, night rate at 01:00, 1.5 idle hours
    assert_eq!(
        helper.read_lines(&output).await,
        vec!["1,9.76", "2,16.17", "3,19.15"]
    );
}

#[tokio::test]
async fn test_app_skips_malformed_trips() {
    let helper = TestHelper::new();
    let dataset = helper
        .write_dataset(
            "malformed.csv",
            "1,37.966660,23.728308,1405594957\n\
             2,37.946545,23.754918,1405591065\n\
             2,37.946545,not-a-number,1405591073\n\
             3,37.946545,23.754918,1405591084\n\
             4,37.946545,23.754918\n",
        )
        .await;
    let output = helper.path("fares.csv");

    let written = App::build(&helper.settings)
        .run(&dataset, &output)
        .await
        .unwrap();

    assert_eq!(written, 2);
    assert_eq!(helper.read_lines(&output).await, vec!["1,3.47", "3,3.47"]);
}

#[tokio::test]
async fn test_app_keeps_trips_around_an_invalid_utf8_line() {
    let helper = TestHelper::new();
    let dataset = helper
        .write_dataset(
            "invalid_utf8.csv",
            b"1,37.966660,23.728308,1405594957\n\
              2,37.946545,23.754918,1405591065\n\
              2,37.946545,23.754918,1405591073\n\
              3,37.9\xff46545,23.754918,1405591084\n\
              4,37.946545,23.754918,1405591094\n\
              5,37.946545,23.754918,1405591104\n\
              6,37.946545,23.754918,1405591114\n",
        )
        .await;
    let output = helper.path("fares.csv");

    let written = App::build(&helper.settings)
        .run(&dataset, &output)
        .await
        .unwrap();

    assert_eq!(written, 5);
    assert_eq!(
        helper.read_lines(&output).await,
        vec!["1,3.47", "2,3.47", "4,3.47", "5,3.47", "6,3.47"]
    );
}

#[tokio::test]
async fn test_app_replaces_existing_output() {
    let helper = TestHelper::new();
    let output = helper
        .write_dataset("fares.csv", "99,1000.00\n98,1000.00\n")
        .await;

    App::build(&helper.settings)
        .run(testdata("rides_01.csv"), &output)
        .await
        .unwrap();

    let lines = helper.read_lines(&output).await;
    assert_eq!(lines.len(), 10);
    assert!(!lines.iter().any(|l| l.starts_with("99,") || l.starts_with("98,")));
}

#[tokio::test]
async fn test_app_fails_on_missing_source() {
    let helper = TestHelper::new();
    let output = helper.path("fares.csv");

    let res = App::build(&helper.settings)
        .run(helper.path("not_found.csv"), &output)
        .await;

    assert!(matches!(res.unwrap_err(), Error::SourceNotFound { .. }));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_app_fails_on_unwritable_destination() {
    let helper = TestHelper::new();
    let output = helper.path("missing-dir").join("fares.csv");

    let res = App::build(&helper.settings)
        .run(testdata("rides_01.csv"), &output)
        .await;

    assert!(matches!(
        res.unwrap_err(),
        Error::DestinationWriteFailure { .. }
    ));
}
