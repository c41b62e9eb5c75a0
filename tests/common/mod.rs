use interview_agent::api::HttpInterviewApi;
use interview_agent::config::ApiConfig;
use serde_json::{json, Value};
use wiremock::MockServer;

#[allow(dead_code)]
pub fn api_for(server: &MockServer) -> HttpInterviewApi {
    HttpInterviewApi::new(&ApiConfig {
        base_url: server.uri(),
        timeout_seconds: 5,
    })
    .expect("failed to build api client")
}

#[allow(dead_code)]
pub fn question_json(session_id: &str, number: u32, total: u32, time_limit: u32) -> Value {
    json!({
        "session_id": session_id,
        "question_number": number,
        "total_questions": total,
        "question": format!("Question {}", number),
        "time_limit": time_limit,
        "is_introduction": number == 0,
        "is_conclusion": number == total + 1
    })
}

#[allow(dead_code)]
pub fn agent_json(agent_id: &str, name: &str) -> Value {
    json!({
        "agent_id": agent_id,
        "name": name,
        "age": "30",
        "created_date": "2024-01-02 03:04:05",
        "memory_nodes": 5
    })
}

/// Write `contents` to a config file inside a fresh temp directory
#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, contents).expect("failed to write config");
    (dir, path)
}
