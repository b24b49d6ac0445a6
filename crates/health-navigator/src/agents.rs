//! Agent Wiring
//!
//! Assembles the navigator's agent hierarchy: a router that delegates to
//! the misinformation checker, the travel workflow (intake, then parallel
//! evidence gathering, then summary), the chronic condition workflow
//! (coach, then hospital finder, then summary), and the prescription
//! explainer. Location tools bind to the session at construction time,
//! so the router is built per session.

use std::sync::Arc;

use agent_core::{
    Agent, AgentBuilder, LlmProvider, MemorySnapshotExporter, MemoryStore, Result as CoreResult,
    SessionKey, SessionService, ToolRegistry,
    workflow::{AgentStep, ParallelWorkflow, SequentialWorkflow, WorkflowNode, WorkflowTool},
};

use crate::advisory::TravelAdvisoryClient;
use crate::content::MedicalContentClient;
use crate::prompts;
use crate::search::GuidelineSearchClient;
use crate::tools::{
    GetLocationTool, GuidelineSearchTool, MedicalContentTool, SaveLocationTool,
    TravelAdvisoryTool,
};

/// Session state keys written by workflow steps
pub mod output_keys {
    pub const TRAVEL_INTENT_SUMMARY: &str = "travel_intent_summary";
    pub const GUIDELINE_TRAVEL_SUMMARY: &str = "guideline_travel_summary";
    pub const ADVISORY_TRAVEL_SUMMARY: &str = "advisory_travel_summary";
    pub const TRAVEL_FINAL_ANSWER: &str = "travel_final_answer";
    pub const CHRONIC_PLAN: &str = "chronic_plan";
    pub const HOSPITAL_SUGGESTIONS: &str = "hospital_suggestions";
    pub const CHRONIC_FINAL_ANSWER: &str = "chronic_final_answer";
    pub const PRESCRIPTION_EXPLANATION: &str = "prescription_explanation";
}

/// External service clients shared by all agents
#[derive(Clone)]
pub struct NavigatorClients {
    pub search: Arc<dyn GuidelineSearchClient>,
    pub advisory: Arc<dyn TravelAdvisoryClient>,
    pub content: Arc<dyn MedicalContentClient>,
}

fn build_agent(
    provider: Arc<dyn LlmProvider>,
    name: &str,
    system_prompt: &str,
    model: &str,
    tools: ToolRegistry,
) -> CoreResult<Agent> {
    AgentBuilder::new()
        .provider(provider)
        .name(name)
        .system_prompt(system_prompt)
        .model(model)
        .tools(tools)
        .build()
}

fn misinformation_step(
    provider: Arc<dyn LlmProvider>,
    clients: &NavigatorClients,
    model: &str,
) -> CoreResult<Arc<dyn WorkflowNode>> {
    let mut tools = ToolRegistry::new();
    tools.register(GuidelineSearchTool::new(clients.search.clone()));
    tools.register(MedicalContentTool::new(clients.content.clone()));

    let agent = build_agent(
        provider,
        "misinformation_agent",
        prompts::MISINFORMATION,
        model,
        tools,
    )?;

    Ok(Arc::new(AgentStep::new(
        agent,
        "Verify a health claim against official CDC and WHO guidance. Pass the claim as the request.",
    )))
}

fn travel_workflow(
    provider: Arc<dyn LlmProvider>,
    clients: &NavigatorClients,
    model: &str,
) -> CoreResult<Arc<dyn WorkflowNode>> {
    let intent = build_agent(
        provider.clone(),
        "travel_intent",
        prompts::TRAVEL_INTENT,
        model,
        ToolRegistry::new(),
    )?;
    let intent_step = Arc::new(
        AgentStep::new(intent, "travel intake")
            .with_output_key(output_keys::TRAVEL_INTENT_SUMMARY),
    );

    let mut guideline_tools = ToolRegistry::new();
    guideline_tools.register(GuidelineSearchTool::new(clients.search.clone()));
    let guideline = build_agent(
        provider.clone(),
        "guideline_travel",
        prompts::GUIDELINE_TRAVEL,
        model,
        guideline_tools,
    )?;
    let guideline_step = Arc::new(
        AgentStep::new(guideline, "CDC/WHO travel guidance")
            .with_output_key(output_keys::GUIDELINE_TRAVEL_SUMMARY),
    );

    let mut advisory_tools = ToolRegistry::new();
    advisory_tools.register(TravelAdvisoryTool::new(clients.advisory.clone()));
    let advisory = build_agent(
        provider.clone(),
        "advisory_travel",
        prompts::ADVISORY_TRAVEL,
        model,
        advisory_tools,
    )?;
    let advisory_step = Arc::new(
        AgentStep::new(advisory, "structured travel advisory")
            .with_output_key(output_keys::ADVISORY_TRAVEL_SUMMARY),
    );

    let evidence = Arc::new(ParallelWorkflow::new(
        "travel_parallel_evidence",
        "fetch CDC/WHO guidance and the structured advisory concurrently",
        vec![
            guideline_step as Arc<dyn WorkflowNode>,
            advisory_step,
        ],
    ));

    let summary = build_agent(
        provider,
        "travel_summary",
        prompts::TRAVEL_SUMMARY,
        model,
        ToolRegistry::new(),
    )?;
    let summary_step = Arc::new(
        AgentStep::new(summary, "reconcile travel evidence")
            .with_output_key(output_keys::TRAVEL_FINAL_ANSWER),
    );

    Ok(Arc::new(SequentialWorkflow::new(
        "travel_workflow",
        "Travel health advice for a trip: intake, official CDC/WHO guidance plus structured advisories, and a reconciled checklist. Pass the user's trip description as the request.",
        vec![
            intent_step as Arc<dyn WorkflowNode>,
            evidence,
            summary_step,
        ],
    )))
}

fn chronic_workflow(
    provider: Arc<dyn LlmProvider>,
    clients: &NavigatorClients,
    model: &str,
) -> CoreResult<Arc<dyn WorkflowNode>> {
    let mut coach_tools = ToolRegistry::new();
    coach_tools.register(GuidelineSearchTool::new(clients.search.clone()));
    coach_tools.register(MedicalContentTool::new(clients.content.clone()));
    let coach = build_agent(
        provider.clone(),
        "chronic_coach",
        prompts::CHRONIC_COACH,
        model,
        coach_tools,
    )?;
    let coach_step = Arc::new(
        AgentStep::new(coach, "chronic condition education plan")
            .with_output_key(output_keys::CHRONIC_PLAN),
    );

    let mut finder_tools = ToolRegistry::new();
    finder_tools.register(GuidelineSearchTool::new(clients.search.clone()));
    let finder = build_agent(
        provider.clone(),
        "hospital_finder",
        prompts::HOSPITAL_FINDER,
        model,
        finder_tools,
    )?;
    let finder_step = Arc::new(
        AgentStep::new(finder, "nearby care options")
            .with_output_key(output_keys::HOSPITAL_SUGGESTIONS),
    );

    let summary = build_agent(
        provider,
        "chronic_summary",
        prompts::CHRONIC_SUMMARY,
        model,
        ToolRegistry::new(),
    )?;
    let summary_step = Arc::new(
        AgentStep::new(summary, "combine plan and hospital options")
            .with_output_key(output_keys::CHRONIC_FINAL_ANSWER),
    );

    Ok(Arc::new(SequentialWorkflow::new(
        "chronic_workflow",
        "Chronic condition education and nearby care options. Include the condition and the user's location in the request (e.g., 'User has diabetes and is in Austin, TX').",
        vec![
            coach_step as Arc<dyn WorkflowNode>,
            finder_step,
            summary_step,
        ],
    )))
}

fn prescription_step(
    provider: Arc<dyn LlmProvider>,
    clients: &NavigatorClients,
    model: &str,
) -> CoreResult<Arc<dyn WorkflowNode>> {
    let mut tools = ToolRegistry::new();
    tools.register(MedicalContentTool::new(clients.content.clone()));

    let agent = build_agent(
        provider,
        "prescription_explainer",
        prompts::PRESCRIPTION_EXPLAINER,
        model,
        tools,
    )?;

    Ok(Arc::new(
        AgentStep::new(
            agent,
            "Explain a medication or diagnosis in plain language. Pass the drug name and/or diagnosis as the request.",
        )
        .with_output_key(output_keys::PRESCRIPTION_EXPLANATION),
    ))
}

/// Build the router agent step for one session.
///
/// The router carries the persistent conversation and delegates to the
/// specialist workflows through tools. Each delegation tool and the
/// location tools are bound to the given session key.
pub fn build_router(
    provider: Arc<dyn LlmProvider>,
    clients: &NavigatorClients,
    sessions: Arc<SessionService>,
    key: &SessionKey,
    model: &str,
) -> CoreResult<AgentStep> {
    let mut tools = ToolRegistry::new();

    for node in [
        misinformation_step(provider.clone(), clients, model)?,
        travel_workflow(provider.clone(), clients, model)?,
        chronic_workflow(provider.clone(), clients, model)?,
        prescription_step(provider.clone(), clients, model)?,
    ] {
        tools.register(WorkflowTool::new(node, sessions.clone(), key.clone()));
    }

    tools.register(SaveLocationTool::new(sessions.clone(), key.clone()));
    tools.register(GetLocationTool::new(sessions, key.clone()));

    let agent = build_agent(provider, "router", prompts::ROUTER, model, tools)?;

    Ok(AgentStep::new(agent, "top-level health navigator").with_persistent_conversation())
}

/// The assembled application: session store, memory export, and per-turn
/// router construction
pub struct Navigator {
    provider: Arc<dyn LlmProvider>,
    clients: NavigatorClients,
    sessions: Arc<SessionService>,
    exporter: MemorySnapshotExporter,
    model: String,
}

impl Navigator {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        clients: NavigatorClients,
        sessions: Arc<SessionService>,
        store: Arc<dyn MemoryStore>,
        model: impl Into<String>,
    ) -> Self {
        let exporter = MemorySnapshotExporter::new(sessions.clone(), store);
        Self {
            provider,
            clients,
            sessions,
            exporter,
            model: model.into(),
        }
    }

    pub fn sessions(&self) -> &Arc<SessionService> {
        &self.sessions
    }

    /// Run one user turn through the router, then snapshot the session
    /// into long-term memory. Export failures never fail the turn.
    pub async fn handle_turn(&self, key: &SessionKey, input: &str) -> CoreResult<String> {
        let router = build_router(
            self.provider.clone(),
            &self.clients,
            self.sessions.clone(),
            key,
            &self.model,
        )?;

        let response = router.run(&self.sessions, key, input).await?;

        self.exporter.export(key);

        Ok(response)
    }
}
