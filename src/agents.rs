//! Agent definitions for the demo variants
//!
//! Agents are plain data handed to the orchestration runtime with every run.
//! Tool execution and hand-off resolution happen on the runtime side.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::str::FromStr;

/// A tool the runtime exposes to an agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    /// JSON schema of the arguments
    pub parameters: Value,
}

impl ToolSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }
}

/// An agent and the agents it may hand off to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSpec {
    pub name: String,
    pub instructions: String,
    #[serde(default)]
    pub tools: Vec<ToolSpec>,
    #[serde(default)]
    pub handoffs: Vec<AgentSpec>,
}

impl AgentSpec {
    pub fn new(name: impl Into<String>, instructions: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instructions: instructions.into(),
            tools: Vec::new(),
            handoffs: Vec::new(),
        }
    }

    pub fn with_tool(mut self, tool: ToolSpec) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn with_handoff(mut self, agent: AgentSpec) -> Self {
        self.handoffs.push(agent);
        self
    }
}

/// Which demo the server runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Demo {
    /// Root assistant handing off to the campus lookup agents
    #[default]
    Campus,
    /// Single planner agent with a weather tool
    Weather,
}

impl Demo {
    pub fn as_str(self) -> &'static str {
        match self {
            Demo::Campus => "campus",
            Demo::Weather => "weather",
        }
    }

    pub fn agent(self) -> AgentSpec {
        match self {
            Demo::Campus => campus_assistant(),
            Demo::Weather => planner(),
        }
    }

    pub fn info(self) -> DemoInfo {
        let examples: &[&str] = match self {
            Demo::Campus => &[
                "Where is the Edison building?",
                "What are the prerequisites for CS 200?",
                "What does the student handbook say about late submissions?",
                "What's on the cafe menu today?",
            ],
            Demo::Weather => &["What's the weather in Seattle?"],
        };
        DemoInfo {
            demo: self,
            title: TITLE.to_string(),
            agent: self.agent().name,
            examples: examples.iter().map(|s| (*s).to_string()).collect(),
            flagging_options: FLAGGING_OPTIONS.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl FromStr for Demo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "campus" => Ok(Demo::Campus),
            "weather" | "planner" => Ok(Demo::Weather),
            other => Err(format!("Unknown demo: {other}")),
        }
    }
}

const TITLE: &str = "DigiPen Campus AI Agent";

/// Reasons a user can attach when flagging a response
pub const FLAGGING_OPTIONS: [&str; 4] = ["Like", "Spam", "Inappropriate", "Other"];

/// UI metadata for a demo
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemoInfo {
    pub demo: Demo,
    pub title: String,
    pub agent: String,
    pub examples: Vec<String>,
    pub flagging_options: Vec<String>,
}

// ============================================================================
// Weather demo
// ============================================================================

fn planner() -> AgentSpec {
    AgentSpec::new(
        "Planner",
        "You are a planner that can plan and execute tasks. Please be concise and accurate in distributing each question.",
    )
    .with_tool(ToolSpec::new(
        "fetch_weather",
        "Fetch the weather for a given location.",
        json!({
            "type": "object",
            "required": ["location"],
            "properties": {
                "location": {
                    "type": "object",
                    "description": "The location to fetch the weather for.",
                    "required": ["lat", "long"],
                    "properties": {
                        "lat": {"type": "number"},
                        "long": {"type": "number"}
                    }
                }
            }
        }),
    ))
    .with_tool(ToolSpec::new(
        "add_two_numbers",
        "Add two integers.",
        json!({
            "type": "object",
            "required": ["x", "y"],
            "properties": {
                "x": {"type": "integer"},
                "y": {"type": "integer"}
            }
        }),
    ))
}

// ============================================================================
// Campus demo
// ============================================================================

fn lookup_tool(name: &str, description: &str, query: &str) -> ToolSpec {
    ToolSpec::new(
        name,
        description,
        json!({
            "type": "object",
            "required": ["query"],
            "properties": {
                "query": {"type": "string", "description": query}
            }
        }),
    )
}

fn building_agent() -> AgentSpec {
    AgentSpec::new(
        "Building Agent",
        "You answer questions about campus buildings: locations, rooms, floors and opening hours. Always look the building up before answering.",
    )
    .with_tool(lookup_tool(
        "lookup_building",
        "Look up a campus building or room.",
        "Building name, room number or landmark",
    ))
}

fn course_agent() -> AgentSpec {
    AgentSpec::new(
        "Course Agent",
        "You answer questions about courses: descriptions, credits, prerequisites and schedules. Quote course codes exactly.",
    )
    .with_tool(lookup_tool(
        "lookup_course",
        "Look up a course in the catalog.",
        "Course code or title",
    ))
}

fn handbook_agent() -> AgentSpec {
    AgentSpec::new(
        "Handbook Agent",
        "You answer questions about student policies using the student handbook. Cite the section you relied on.",
    )
    .with_tool(lookup_tool(
        "search_handbook",
        "Search the student handbook.",
        "Policy topic or question",
    ))
}

fn cafe_agent() -> AgentSpec {
    AgentSpec::new(
        "Cafe Agent",
        "You answer questions about the campus cafe: today's menu, prices and hours.",
    )
    .with_tool(lookup_tool(
        "get_cafe_menu",
        "Get the cafe menu for a day.",
        "Day of the week, or 'today'",
    ))
}

fn campus_assistant() -> AgentSpec {
    AgentSpec::new(
        "Assistant",
        "You are the campus assistant. Hand buildings questions to the Building Agent, course questions to the Course Agent, policy questions to the Handbook Agent and food questions to the Cafe Agent. Answer small talk yourself, concisely.",
    )
    .with_handoff(building_agent())
    .with_handoff(course_agent())
    .with_handoff(handbook_agent())
    .with_handoff(cafe_agent())
}
