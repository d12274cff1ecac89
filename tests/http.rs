use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct DifficultyCounts {
    easy: u64,
    medium: u64,
    hard: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatsResponse {
    total_problems: u64,
    current_day: u32,
    current_streak: u32,
    max_streak: u32,
    completion_percentage: u32,
    problems_by_difficulty: DifficultyCounts,
    pattern_counts: BTreeMap<String, u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntryResponse {
    id: String,
    day: u32,
    problems_solved: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlogResponse {
    read_time: u32,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "hundred_days_http_{}_{}.json",
        std::process::id(),
        nanos
    ));
    path.to_string_lossy().to_string()
}

fn unique_pattern(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{prefix}-{nanos}")
}

fn today_string() -> String {
    chrono::Local::now().date_naive().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/stats")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_hundred_days"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn get_stats(client: &Client, base_url: &str) -> StatsResponse {
    client
        .get(format!("{base_url}/api/stats"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

fn entry_body(day: u32, pattern: &str, problems: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "date": today_string(),
        "day": day,
        "pattern": pattern,
        "problems": problems,
        "tags": ["fixture"],
        "notes": "logged by the http test"
    })
}

#[tokio::test]
async fn http_new_entry_shows_up_in_stats() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = get_stats(&client, &server.base_url).await;
    let pattern = unique_pattern("two-heaps");
    let day = before.current_day + 1;

    let entry: EntryResponse = client
        .post(format!("{}/api/entries", server.base_url))
        .json(&entry_body(
            day,
            &pattern,
            serde_json::json!([
                { "title": "Two Sum", "slug": "two-sum", "difficulty": "Easy" },
                { "title": "Trapping Rain Water", "slug": "trapping-rain-water", "difficulty": "Hard" }
            ]),
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(entry.day, day);
    assert_eq!(entry.problems_solved, 2);

    let after = get_stats(&client, &server.base_url).await;
    assert_eq!(after.total_problems, before.total_problems + 2);
    assert_eq!(after.current_day, day);
    assert_eq!(after.completion_percentage, day);
    assert_eq!(after.problems_by_difficulty.easy, before.problems_by_difficulty.easy + 1);
    assert_eq!(after.problems_by_difficulty.hard, before.problems_by_difficulty.hard + 1);
    assert_eq!(after.problems_by_difficulty.medium, before.problems_by_difficulty.medium);
    assert_eq!(after.pattern_counts.get(&pattern), Some(&1));
    assert!(after.current_streak >= 1);
    assert!(after.max_streak >= after.current_streak);
}

#[tokio::test]
async fn http_edit_entry_recomputes_stats() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = get_stats(&client, &server.base_url).await;
    let pattern = unique_pattern("backtracking");
    let day = before.current_day + 1;

    let created: EntryResponse = client
        .post(format!("{}/api/entries", server.base_url))
        .json(&entry_body(
            day,
            &pattern,
            serde_json::json!([
                { "title": "Subsets", "slug": "subsets", "difficulty": "Medium" }
            ]),
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let updated: EntryResponse = client
        .put(format!("{}/api/entries/{}", server.base_url, created.id))
        .json(&entry_body(
            day,
            &pattern,
            serde_json::json!([
                { "title": "Subsets", "slug": "subsets", "difficulty": "Medium" },
                { "title": "Permutations", "slug": "permutations", "difficulty": "Medium" },
                { "title": "N-Queens", "slug": "n-queens", "difficulty": "Hard" }
            ]),
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.problems_solved, 3);

    let after = get_stats(&client, &server.base_url).await;
    assert_eq!(after.total_problems, before.total_problems + 3);
    assert_eq!(after.pattern_counts.get(&pattern), Some(&1));
}

#[tokio::test]
async fn http_delete_entry_removes_it_from_stats() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = get_stats(&client, &server.base_url).await;
    let pattern = unique_pattern("union-find");

    let created: EntryResponse = client
        .post(format!("{}/api/entries", server.base_url))
        .json(&entry_body(
            before.current_day + 1,
            &pattern,
            serde_json::json!([
                { "title": "Number of Provinces", "slug": "number-of-provinces", "difficulty": "Medium" }
            ]),
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let response = client
        .delete(format!("{}/api/entries/{}", server.base_url, created.id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NO_CONTENT);

    let after = get_stats(&client, &server.base_url).await;
    assert_eq!(after.total_problems, before.total_problems);
    assert!(after.pattern_counts.get(&pattern).is_none());
}

#[tokio::test]
async fn http_entry_without_problems_is_rejected() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = get_stats(&client, &server.base_url).await;

    let response = client
        .post(format!("{}/api/entries", server.base_url))
        .json(&entry_body(
            before.current_day + 1,
            "empty-day",
            serde_json::json!([]),
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    // Blank titles and slugs are dropped before the emptiness check.
    let response = client
        .post(format!("{}/api/entries", server.base_url))
        .json(&entry_body(
            before.current_day + 1,
            "empty-day",
            serde_json::json!([{ "title": "   ", "slug": "", "difficulty": "Easy" }]),
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    let after = get_stats(&client, &server.base_url).await;
    assert_eq!(after.total_problems, before.total_problems);
}

#[tokio::test]
async fn http_unknown_entry_id_is_not_found() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .delete(format!("{}/api/entries/no-such-id", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);

    let response = client
        .put(format!("{}/api/entries/no-such-id", server.base_url))
        .json(&entry_body(
            1,
            "ghost",
            serde_json::json!([
                { "title": "Two Sum", "slug": "two-sum", "difficulty": "Easy" }
            ]),
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_blog_post_gets_a_read_time() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let content = "word ".repeat(450);
    let blog: BlogResponse = client
        .post(format!("{}/api/blogs", server.base_url))
        .json(&serde_json::json!({
            "title": "Sliding window, finally",
            "author": "journal owner",
            "content": content,
            "tags": ["sliding window"],
            "difficulty": "Medium",
            "problemSlug": "minimum-window-substring"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(blog.read_time, 3);

    let response = client
        .post(format!("{}/api/blogs", server.base_url))
        .json(&serde_json::json!({
            "title": "  ",
            "author": "journal owner",
            "content": "short"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
}
