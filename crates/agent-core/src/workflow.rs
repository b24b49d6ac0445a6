//! Workflow Orchestration
//!
//! Declarative composition of agents into multi-step workflows:
//!
//! - [`AgentStep`] runs one agent turn against the shared session, and
//!   optionally records the response under an output key in session state.
//! - [`SequentialWorkflow`] runs steps in order; later steps see earlier
//!   output keys through `{+key}` placeholders in their instructions.
//! - [`ParallelWorkflow`] runs steps concurrently; each step writes its
//!   output key independently.
//! - [`WorkflowTool`] exposes a workflow (or single agent step) as a tool,
//!   so a router agent can delegate to it.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{AgentError, Result};
use crate::message::{Conversation, Message, Role};
use crate::reasoning::Agent;
use crate::session::{SessionKey, SessionService};
use crate::tool::{ParameterSchema, Tool, ToolCall, ToolResult, ToolSchema};

/// Render `{+key}` placeholders in an instruction template from session state.
///
/// Missing keys render as empty strings; the raw text is otherwise
/// preserved verbatim.
pub fn render_template(template: &str, state: &HashMap<String, String>) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{+") {
        rendered.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        match after.find('}') {
            Some(end) => {
                let key = &after[..end];
                match state.get(key) {
                    Some(value) => rendered.push_str(value),
                    None => {
                        tracing::debug!(key, "template placeholder has no state value");
                    }
                }
                rest = &after[end + 1..];
            }
            None => {
                // Unterminated placeholder: keep literal text
                rendered.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    rendered.push_str(rest);
    rendered
}

/// A runnable node in an agent workflow
#[async_trait]
pub trait WorkflowNode: Send + Sync {
    /// Node name (used in logs, errors, and tool schemas)
    fn name(&self) -> &str;

    /// One-line description of what the node does
    fn description(&self) -> &str;

    /// Run the node against a session with the given input
    async fn run(
        &self,
        sessions: &SessionService,
        key: &SessionKey,
        input: &str,
    ) -> Result<String>;
}

/// A single agent turn within a workflow
pub struct AgentStep {
    agent: Agent,
    description: String,
    output_key: Option<String>,
    persist_conversation: bool,
}

impl AgentStep {
    pub fn new(agent: Agent, description: impl Into<String>) -> Self {
        Self {
            agent,
            description: description.into(),
            output_key: None,
            persist_conversation: false,
        }
    }

    /// Record the step's response in session state under this key
    pub fn with_output_key(mut self, key: impl Into<String>) -> Self {
        self.output_key = Some(key.into());
        self
    }

    /// Keep the conversation in the session across turns (for the
    /// top-level router); sub-agent steps run on fresh conversations.
    pub fn with_persistent_conversation(mut self) -> Self {
        self.persist_conversation = true;
        self
    }
}

#[async_trait]
impl WorkflowNode for AgentStep {
    fn name(&self) -> &str {
        &self.agent.config().name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn run(
        &self,
        sessions: &SessionService,
        key: &SessionKey,
        input: &str,
    ) -> Result<String> {
        let state = sessions.state_snapshot(key);
        let rendered = render_template(&self.agent.config().system_prompt, &state);
        let system_prompt = self.agent.full_system_prompt(&rendered);

        let mut conversation = if self.persist_conversation {
            sessions.conversation(key)
        } else {
            Conversation::new()
        };

        if conversation.messages().first().map(|m| &m.role) != Some(&Role::System) {
            conversation
                .messages_mut()
                .insert(0, Message::system(system_prompt));
        }

        conversation.push(Message::user(input));
        conversation.truncate_to_fit();

        let response = self
            .agent
            .run(&mut conversation)
            .await
            .map_err(|e| AgentError::Workflow {
                step: self.name().to_string(),
                message: e.to_string(),
            })?;

        if self.persist_conversation {
            sessions.replace_conversation(key, conversation);
        }

        if let Some(output_key) = &self.output_key {
            sessions.set_state(key, output_key.clone(), &response);
            tracing::debug!(step = %self.name(), output_key = %output_key, "recorded step output");
        }

        Ok(response)
    }
}

/// Runs sub-nodes one after another; the last node's output is the result
pub struct SequentialWorkflow {
    name: String,
    description: String,
    steps: Vec<Arc<dyn WorkflowNode>>,
}

impl SequentialWorkflow {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        steps: Vec<Arc<dyn WorkflowNode>>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            steps,
        }
    }
}

#[async_trait]
impl WorkflowNode for SequentialWorkflow {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn run(
        &self,
        sessions: &SessionService,
        key: &SessionKey,
        input: &str,
    ) -> Result<String> {
        let mut last_output = String::new();

        for step in &self.steps {
            tracing::debug!(workflow = %self.name, step = %step.name(), "running sequential step");
            last_output = step.run(sessions, key, input).await?;
        }

        Ok(last_output)
    }
}

/// Runs sub-nodes concurrently; outputs are joined for the caller while
/// each node records its own output key in session state
pub struct ParallelWorkflow {
    name: String,
    description: String,
    steps: Vec<Arc<dyn WorkflowNode>>,
}

impl ParallelWorkflow {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        steps: Vec<Arc<dyn WorkflowNode>>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            steps,
        }
    }
}

#[async_trait]
impl WorkflowNode for ParallelWorkflow {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn run(
        &self,
        sessions: &SessionService,
        key: &SessionKey,
        input: &str,
    ) -> Result<String> {
        let futures: Vec<_> = self
            .steps
            .iter()
            .map(|step| step.run(sessions, key, input))
            .collect();

        let results = futures::future::join_all(futures).await;

        let mut outputs = Vec::with_capacity(results.len());
        for result in results {
            outputs.push(result?);
        }

        Ok(outputs.join("\n\n"))
    }
}

/// Exposes a workflow node as a tool a router agent can call
///
/// Node failures surface as failed tool results (observations the router
/// can relay or recover from), not as turn-level errors.
pub struct WorkflowTool {
    node: Arc<dyn WorkflowNode>,
    sessions: Arc<SessionService>,
    key: SessionKey,
}

impl WorkflowTool {
    pub fn new(
        node: Arc<dyn WorkflowNode>,
        sessions: Arc<SessionService>,
        key: SessionKey,
    ) -> Self {
        Self {
            node,
            sessions,
            key,
        }
    }
}

#[async_trait]
impl Tool for WorkflowTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.node.name().to_string(),
            description: self.node.description().to_string(),
            parameters: vec![ParameterSchema::required_string(
                "request",
                "The user's request, including any context the specialist needs (e.g. condition and location)",
            )],
            category: Some("delegation".into()),
            has_side_effects: true,
        }
    }

    async fn execute(&self, call: &ToolCall) -> Result<ToolResult> {
        let request = call
            .str_arg("request")
            .ok_or_else(|| AgentError::ToolValidation("Missing request".into()))?;

        match self.node.run(&self.sessions, &self.key, request).await {
            Ok(output) => Ok(ToolResult::success(self.node.name(), output)),
            Err(e) => {
                tracing::warn!(node = %self.node.name(), error = %e, "delegated workflow failed");
                Ok(ToolResult::failure(self.node.name(), e.user_message()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reasoning::AgentConfig;
    use crate::testkit::{EchoProvider, ScriptedProvider};
    use crate::tool::ToolRegistry;

    fn step(
        name: &str,
        prompt: &str,
        provider: Arc<dyn crate::provider::LlmProvider>,
        output_key: Option<&str>,
    ) -> Arc<AgentStep> {
        let config = AgentConfig {
            name: name.into(),
            system_prompt: prompt.into(),
            ..Default::default()
        };
        let agent = Agent::new(provider, Arc::new(ToolRegistry::new()), config);
        let mut step = AgentStep::new(agent, format!("{} step", name));
        if let Some(key) = output_key {
            step = step.with_output_key(key);
        }
        Arc::new(step)
    }

    #[test]
    fn test_render_template() {
        let mut state = HashMap::new();
        state.insert("user_location".to_string(), "Austin, TX".to_string());

        let rendered = render_template("The user is located in: {+user_location}", &state);
        assert_eq!(rendered, "The user is located in: Austin, TX");
    }

    #[test]
    fn test_render_template_missing_key_is_empty() {
        let state = HashMap::new();
        let rendered = render_template("CDC view: {+guideline_travel_summary}!", &state);
        assert_eq!(rendered, "CDC view: !");
    }

    #[test]
    fn test_render_template_unterminated_placeholder_kept_verbatim() {
        let state = HashMap::new();
        let rendered = render_template("broken {+user_location", &state);
        assert_eq!(rendered, "broken {+user_location");
    }

    #[tokio::test]
    async fn test_agent_step_records_output_key() {
        let sessions = SessionService::new();
        let key = SessionKey::new("u1", "s1");

        let node = step(
            "travel_intent",
            "Summarize the travel plan.",
            Arc::new(EchoProvider::new("intent")),
            Some("travel_intent_summary"),
        );

        let output = node
            .run(&sessions, &key, "Two weeks in Kenya")
            .await
            .unwrap();

        assert_eq!(output, "intent: Two weeks in Kenya");
        assert_eq!(
            sessions
                .get_state(&key, "travel_intent_summary")
                .as_deref(),
            Some("intent: Two weeks in Kenya")
        );
    }

    #[tokio::test]
    async fn test_sequential_workflow_pipes_state_between_steps() {
        let sessions = SessionService::new();
        let key = SessionKey::new("u1", "s1");

        // First step records its output; second step's instruction
        // interpolates it and the scripted provider proves the rendered
        // prompt reached the model by echoing a canned summary.
        let first = step(
            "chronic_coach",
            "Write an education plan.",
            Arc::new(EchoProvider::new("plan")),
            Some("chronic_plan"),
        );
        let second = step(
            "chronic_summary",
            "Combine the plan: {+chronic_plan}",
            Arc::new(EchoProvider::new("summary")),
            Some("chronic_final_answer"),
        );

        let workflow = SequentialWorkflow::new(
            "chronic_workflow",
            "education plan then summary",
            vec![first as Arc<dyn WorkflowNode>, second],
        );

        let output = workflow
            .run(&sessions, &key, "I have kidney stones")
            .await
            .unwrap();

        assert_eq!(output, "summary: I have kidney stones");
        assert_eq!(
            sessions.get_state(&key, "chronic_plan").as_deref(),
            Some("plan: I have kidney stones")
        );
        assert_eq!(
            sessions.get_state(&key, "chronic_final_answer").as_deref(),
            Some("summary: I have kidney stones")
        );
    }

    #[tokio::test]
    async fn test_parallel_workflow_records_both_output_keys() {
        let sessions = SessionService::new();
        let key = SessionKey::new("u1", "s1");

        let cdc = step(
            "guideline_travel",
            "Summarize CDC/WHO travel guidance.",
            Arc::new(EchoProvider::new("cdc")),
            Some("guideline_travel_summary"),
        );
        let tugo = step(
            "advisory_travel",
            "Summarize the travel advisory.",
            Arc::new(EchoProvider::new("advisory")),
            Some("advisory_travel_summary"),
        );

        let workflow = ParallelWorkflow::new(
            "travel_parallel_evidence",
            "fetch guidance concurrently",
            vec![cdc as Arc<dyn WorkflowNode>, tugo],
        );

        let output = workflow.run(&sessions, &key, "Kenya").await.unwrap();

        assert!(output.contains("cdc: Kenya"));
        assert!(output.contains("advisory: Kenya"));
        assert!(sessions.get_state(&key, "guideline_travel_summary").is_some());
        assert!(sessions.get_state(&key, "advisory_travel_summary").is_some());
    }

    #[tokio::test]
    async fn test_workflow_tool_surfaces_failure_as_tool_result() {
        let sessions = Arc::new(SessionService::new());
        let key = SessionKey::new("u1", "s1");

        // Script is empty, so the step errors immediately
        let failing = step(
            "travel_workflow",
            "irrelevant",
            Arc::new(ScriptedProvider::new(vec![])),
            None,
        );

        let tool = WorkflowTool::new(failing, sessions.clone(), key);
        let call = ToolCall::with_arg("travel_workflow", "request", "Kenya trip");

        let result = tool.execute(&call).await.unwrap();
        assert!(!result.success);
    }

    #[tokio::test]
    async fn test_persistent_conversation_survives_turns() {
        let sessions = SessionService::new();
        let key = SessionKey::new("u1", "s1");

        let config = AgentConfig {
            name: "router".into(),
            system_prompt: "You are the navigator.".into(),
            ..Default::default()
        };
        let agent = Agent::new(
            Arc::new(EchoProvider::new("router")),
            Arc::new(ToolRegistry::new()),
            config,
        );
        let node = AgentStep::new(agent, "router").with_persistent_conversation();

        node.run(&sessions, &key, "first").await.unwrap();
        node.run(&sessions, &key, "second").await.unwrap();

        // system + (user, assistant) x 2
        assert_eq!(sessions.conversation(&key).len(), 5);
    }
}
