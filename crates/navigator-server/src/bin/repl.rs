//! health-navigator CLI
//!
//! Interactive REPL for local testing. One session per run; `/state`
//! prints the session's key/value state and the long-term memory
//! snapshot, `exit` or `quit` ends the session.

use std::io::{BufRead, Write};
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agent_core::{
    InMemoryMemoryStore, LlmProvider, MemoryStore, SessionKey, SessionService,
};
use agent_runtime::GeminiProvider;
use health_navigator::{
    advisory::TugoClient,
    content::ContentServerClient,
    search::GoogleCustomSearchClient,
    Navigator, NavigatorClients, NavigatorConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = NavigatorConfig::from_env();
    config.warn_missing();

    let provider: Arc<dyn LlmProvider> = Arc::new(GeminiProvider::from_env()?);

    let clients = NavigatorClients {
        search: Arc::new(GoogleCustomSearchClient::new(
            config.search_api_key.clone(),
            config.search_engine_id.clone(),
        )),
        advisory: Arc::new(TugoClient::new(config.tugo_api_key.clone())),
        content: Arc::new(ContentServerClient::new(config.medadapt_url.clone())),
    };

    let sessions = Arc::new(SessionService::new());
    let memory = Arc::new(InMemoryMemoryStore::new());

    let navigator = Navigator::new(
        provider,
        clients,
        sessions.clone(),
        memory.clone(),
        config.gemini_model.clone(),
    );

    let key = SessionKey::generate("cli-user");

    println!("🚀 Health Navigator CLI");
    println!("Session ID: {}", key.session_id);
    println!("Type your question, or 'exit' to quit. Type '/state' to inspect memory.\n");

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("👤 You: ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let input = line?.trim().to_string();

        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            println!("👋 Bye!");
            break;
        }

        if input == "/state" {
            print_state(&sessions, &memory, &key);
            continue;
        }

        match navigator.handle_turn(&key, &input).await {
            Ok(response) => println!("🤖 Agent: {}\n", response),
            Err(e) => eprintln!("⚠ Error: {}\n", e.user_message()),
        }
    }

    Ok(())
}

fn print_state(sessions: &SessionService, memory: &InMemoryMemoryStore, key: &SessionKey) {
    println!("\n🧠 Session State:");
    let state = sessions.state_snapshot(key);
    if state.is_empty() {
        println!("  (Empty)");
    } else {
        for (k, v) in &state {
            println!("  {}: {}", k, v);
        }
    }

    println!("\n🗄  Long-Term Memory items:");
    match memory.get(&key.session_id) {
        Ok(Some(record)) => {
            if record.entries.is_empty() {
                println!("  (Empty snapshot, saved at {})", record.saved_at);
            } else {
                for (k, v) in &record.entries {
                    println!("  {}: {}", k, v);
                }
            }
        }
        Ok(None) => println!("  (No memories found)"),
        Err(e) => println!("  (Could not fetch memories: {})", e),
    }
    println!();
}
