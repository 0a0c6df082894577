use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use stubsmith::runtime::NotMocked;
use stubsmith_macros::mock;

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    NotMocked(String),
    Offline,
}

impl From<NotMocked> for ApiError {
    fn from(err: NotMocked) -> Self {
        ApiError::NotMocked(err.message().to_string())
    }
}

#[mock]
pub trait Users {
    fn fetch(&self, id: i64) -> Result<String, ApiError>;
    fn rename(&mut self, id: i64, name: &str) -> Result<(), ApiError>;
    fn load(&self, id: i64, completion: Box<dyn FnOnce(Result<String, ApiError>) + Send>);
}

#[mock(name = FakeClock, prefix = stub, message = "clock is offline")]
trait Clock {
    async fn now(&self) -> Result<u64, ApiError>;
    fn on_error(&self, report: Box<dyn FnMut(ApiError) + Send>);
}

#[mock]
trait Profile {
    fn label(&self) -> String {
        String::from("profile")
    }
    fn score(&self, _: u8, arg0: u16) -> Result<u32, ApiError>;
}

#[test]
fn test_unstubbed_direct_method_returns_default_error() {
    let users = UsersMock::new();
    assert_eq!(
        users.fetch(5),
        Err(ApiError::NotMocked("Not mocked".to_string()))
    );
}

#[test]
fn test_stubbed_direct_method_forwards_arguments() {
    let mut users = UsersMock::new();
    users.mock_fetch(|_| Ok("ok".to_string()));
    assert_eq!(users.fetch(5), Ok("ok".to_string()));

    users.mock_fetch(|id| Ok(format!("user-{id}")));
    assert_eq!(users.fetch(5), Ok("user-5".to_string()));
}

#[test]
fn test_borrowed_parameters_reach_the_stub() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut users = UsersMock::default();
    let log = Arc::clone(&seen);
    users.mock_rename(move |id, name| {
        log.lock().unwrap().push(format!("{id}:{name}"));
        Err(ApiError::Offline)
    });

    assert_eq!(users.rename(3, "ada"), Err(ApiError::Offline));
    assert_eq!(*seen.lock().unwrap(), ["3:ada"]);
}

#[test]
fn test_unstubbed_completion_method_reports_failure_once() {
    let users = UsersMock::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let result = Arc::new(Mutex::new(None));

    let (counter, slot) = (Arc::clone(&calls), Arc::clone(&result));
    users.load(
        7,
        Box::new(move |outcome| {
            counter.fetch_add(1, Ordering::SeqCst);
            *slot.lock().unwrap() = Some(outcome);
        }),
    );

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        result.lock().unwrap().take(),
        Some(Err(ApiError::NotMocked("Not mocked".to_string())))
    );
}

#[test]
fn test_stubbed_completion_method_receives_callback() {
    let mut users = UsersMock::new();
    users.mock_load(|id, completion| completion(Ok(format!("loaded-{id}"))));

    let result = Arc::new(Mutex::new(None));
    let slot = Arc::clone(&result);
    users.load(
        9,
        Box::new(move |outcome| *slot.lock().unwrap() = Some(outcome)),
    );
    assert_eq!(
        result.lock().unwrap().take(),
        Some(Ok("loaded-9".to_string()))
    );
}

#[test]
fn test_custom_not_mocked_error() {
    let users = UsersMock::with_not_mocked_error("backend unavailable");
    assert_eq!(
        users.fetch(1),
        Err(ApiError::NotMocked("backend unavailable".to_string()))
    );
}

#[tokio::test]
async fn test_async_method_awaits_stub() {
    let mut clock = FakeClock::new();
    assert_eq!(
        clock.now().await,
        Err(ApiError::NotMocked("clock is offline".to_string()))
    );

    clock.stub_now(|| async { Ok(42) });
    assert_eq!(clock.now().await, Ok(42));
}

#[test]
fn test_plain_value_callback_receives_converted_error() {
    let mut clock = FakeClock::new();
    let reports = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&reports);
    clock.on_error(Box::new(move |err| sink.lock().unwrap().push(err)));

    clock.stub_on_error(|mut report| report(ApiError::Offline));
    let sink = Arc::clone(&reports);
    clock.on_error(Box::new(move |err| sink.lock().unwrap().push(err)));

    assert_eq!(
        *reports.lock().unwrap(),
        [
            ApiError::NotMocked("clock is offline".to_string()),
            ApiError::Offline
        ]
    );
}

#[test]
fn test_provided_method_keeps_default_and_pattern_parameters_forward() {
    let mut profile = ProfileMock::new();
    assert_eq!(profile.label(), "profile");

    profile.mock_score(|bonus, base| Ok(u32::from(bonus) + u32::from(base)));
    assert_eq!(profile.score(2, 40), Ok(42));
}
