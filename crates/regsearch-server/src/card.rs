//! Agent card: the metadata document describing the service.
//!
//! Input schema is generated from the searchable fields and the result item
//! schema from the exposed fields, so the card never advertises a field the
//! policy would not accept or return.

use regsearch_core::Config;
use serde::Serialize;
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, Serialize)]
pub struct AgentCard {
    pub name: String,
    pub description: String,
    pub version: String,
    pub url: String,
    pub capabilities: Capabilities,
    pub skills: Vec<AgentSkill>,
    #[serde(rename = "defaultInputModes")]
    pub default_input_modes: Vec<String>,
    #[serde(rename = "defaultOutputModes")]
    pub default_output_modes: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Capabilities {
    pub supports_message: bool,
    pub supports_task_creation: bool,
    pub supports_streaming: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentSkill {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub input_schema: Value,
    pub output_schema: Value,
}

/// Built-in descriptions for common registration columns.
fn describe_field(field: &str) -> String {
    let known = match field {
        "name" => "First name to search (partial match, case-insensitive)",
        "surname" => "Last name to search (partial match, case-insensitive)",
        "cpf" => "CPF number to search (Brazilian ID document)",
        "phone" => "Phone number to search",
        "city" => "City name to search (partial match, case-insensitive)",
        "state" => "State abbreviation (e.g., SP, RJ, MG)",
        "address" => "Street address to search",
        _ => return format!("{} field", capitalize(field)),
    };
    known.to_string()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn agent_card(config: &Config) -> AgentCard {
    let policy = &config.fields;

    let input_properties: Map<String, Value> = policy
        .searchable
        .iter()
        .map(|f| {
            (
                f.to_string(),
                json!({"type": "string", "description": describe_field(f)}),
            )
        })
        .collect();
    let output_properties: Map<String, Value> = policy
        .exposed
        .iter()
        .map(|f| (f.to_string(), json!({"type": "string"})))
        .collect();

    let searchable: Vec<&str> = policy.searchable.iter().collect();
    let skill = AgentSkill {
        id: "search_registration".to_string(),
        name: "search_registration".to_string(),
        description: format!(
            "Search registration data by {}. Supports partial matching and returns \
             results with privacy-filtered fields.",
            searchable.join(", ")
        ),
        tags: ["search", "registration", "data-query"]
            .map(String::from)
            .to_vec(),
        input_schema: json!({
            "type": "object",
            "properties": input_properties,
            "additionalProperties": false,
        }),
        output_schema: json!({
            "type": "object",
            "properties": {
                "status": {"type": "string"},
                "message": {"type": "string"},
                "count": {"type": "integer"},
                "results": {
                    "type": "array",
                    "items": {"type": "object", "properties": output_properties},
                },
            },
        }),
    };

    AgentCard {
        name: config.agent.display_name.clone(),
        description: config.agent.description.clone(),
        version: config.agent.version.clone(),
        url: config.public_url(),
        capabilities: Capabilities {
            supports_message: true,
            supports_task_creation: true,
            supports_streaming: false,
        },
        skills: vec![skill],
        default_input_modes: vec!["text".to_string()],
        default_output_modes: vec!["text".to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CONFIG: &str = r#"
agent:
  name: registration_agent
  display_name: Registration Data Agent
  description: Searches registration records
  version: 2.1.0
data:
  csv_path: data/registrations.csv
fields:
  exposed_fields: [name, city]
  searchable_fields: [name, cpf, birth_date]
server:
  host: 127.0.0.1
  port: 9000
"#;

    fn card() -> Value {
        let cfg = Config::from_yaml(CONFIG).unwrap();
        serde_json::to_value(agent_card(&cfg)).unwrap()
    }

    #[test]
    fn header_fields_come_from_config() {
        let c = card();
        assert_eq!(c["name"], "Registration Data Agent");
        assert_eq!(c["version"], "2.1.0");
        assert_eq!(c["url"], "http://127.0.0.1:9000");
        assert_eq!(c["capabilities"]["supports_streaming"], false);
        assert_eq!(c["defaultInputModes"], json!(["text"]));
    }

    #[test]
    fn input_schema_lists_only_searchable_fields() {
        let c = card();
        let props = c["skills"][0]["input_schema"]["properties"].as_object().unwrap();
        let mut keys: Vec<&str> = props.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["birth_date", "cpf", "name"]);
        assert_eq!(props["birth_date"]["description"], "Birth_date field");
        assert_eq!(c["skills"][0]["input_schema"]["additionalProperties"], false);
    }

    #[test]
    fn output_schema_lists_only_exposed_fields() {
        let c = card();
        let items = &c["skills"][0]["output_schema"]["properties"]["results"]["items"];
        let props = items["properties"].as_object().unwrap();
        assert!(props.contains_key("city"));
        assert!(!props.contains_key("cpf"));
    }
}
