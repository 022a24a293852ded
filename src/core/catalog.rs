//! The standard catalog of IT-operations flows.
//!
//! Each constructor returns one immutable [`FlowDefinition`]; the
//! [`Catalog`] collects all fifteen and looks them up by name. Definitions
//! are built once at process start.

use crate::core::flow::FlowDefinition;
use crate::core::shape::{FieldType, Shape};

/// Name-keyed registry of the supported flow definitions.
pub struct Catalog {
    flows: Vec<FlowDefinition>,
}

impl Catalog {
    /// The full standard catalog.
    pub fn standard() -> Self {
        Self {
            flows: vec![
                summarize_alerts(),
                troubleshoot_problems(),
                analyze_security_logs(),
                analyze_user_activity(),
                score_user_ip_risk(),
                suggest_security_improvements(),
                anticipate_phishing(),
                predict_potential_issues(),
                predict_hardware_failure(),
                predict_support_needs(),
                get_root_cause_analysis(),
                analyze_change_impact(),
                forecast_license_usage(),
                generate_task_script(),
                generate_it_policy(),
            ],
        }
    }

    pub fn get(&self, name: &str) -> Option<&FlowDefinition> {
        self.flows.iter().find(|f| f.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FlowDefinition> {
        self.flows.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.flows.iter().map(|f| f.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }
}

const CONFIDENCE: [&str; 3] = ["High", "Medium", "Low"];
const RISK_LEVELS: [&str; 4] = ["Low", "Medium", "High", "Critical"];

/// Summarizes IT alerts in simple language for non-technical users.
pub fn summarize_alerts() -> FlowDefinition {
    FlowDefinition::new(
        "summarize_alerts",
        "Summarizes IT alerts for non-technical users.",
        Shape::new().field(
            "alerts",
            FieldType::Str,
            "A list of IT alerts, including details like timestamp, severity, and description.",
        ),
        Shape::new().field(
            "summary",
            FieldType::Str,
            "A concise summary of the IT alerts, written in simple language for non-technical users.",
        ),
        "You are an AI assistant specializing in summarizing IT alerts for non-technical users.\n\n\
         Given the following IT alerts, provide a concise summary in simple language that \
         non-technical users can easily understand. Focus on the impact of the alerts and any \
         necessary actions.\n\n\
         Alerts:\n{{alerts}}\n\nSummary:\n",
    )
}

/// Turns a natural-language problem description into troubleshooting steps.
pub fn troubleshoot_problems() -> FlowDefinition {
    FlowDefinition::new(
        "troubleshoot_problems",
        "Provides step-by-step troubleshooting instructions for a described IT problem.",
        Shape::new().field(
            "problem_description",
            FieldType::Str,
            "A description of the IT problem encountered by the user.",
        ),
        Shape::new().field(
            "troubleshooting_instructions",
            FieldType::Str,
            "Step-by-step instructions to troubleshoot the described problem.",
        ),
        "You are an AI IT assistant that helps users troubleshoot their IT problems.\n\n\
         Provide step-by-step instructions to resolve the following problem:\n\n\
         {{problem_description}}\n",
    )
}

/// Scans security logs for indicators of malicious activity.
pub fn analyze_security_logs() -> FlowDefinition {
    FlowDefinition::new(
        "analyze_security_logs",
        "Analyzes security logs for potential threats.",
        Shape::new().field(
            "logs",
            FieldType::Str,
            "A string containing security logs to be analyzed. This can include firewall logs, \
             authentication logs, etc.",
        ),
        Shape::new()
            .field(
                "threats_found",
                FieldType::Bool,
                "Whether or not any potential threats were found in the logs.",
            )
            .field("summary", FieldType::Str, "A high-level summary of the findings.")
            .field(
                "detailed_report",
                FieldType::Str,
                "A detailed, markdown-formatted report of the analysis, including identified \
                 threats, patterns, and recommended actions.",
            ),
        "You are an expert cybersecurity analyst. Your task is to analyze the provided security \
         logs to identify potential threats.\n\n\
         Look for patterns that might indicate malicious activity, such as:\n\
         - Repeated failed login attempts (potential brute-force attack).\n\
         - Logins from unusual geographic locations.\n\
         - Large data transfers to external IP addresses (potential data exfiltration).\n\
         - Port scanning activity.\n\
         - Any other suspicious log entries.\n\n\
         Based on your analysis, determine if threats were found. Provide a concise summary and a \
         detailed report of your findings in markdown format. If threats are found, the report \
         should include the nature of the threat, the evidence from the logs, and recommended \
         mitigation steps.\n\n\
         If no threats are found, state that the logs appear normal.\n\n\
         Security Logs:\n{{{logs}}}\n",
    )
}

/// Checks one user's activity logs for behavior anomalies.
pub fn analyze_user_activity() -> FlowDefinition {
    FlowDefinition::new(
        "analyze_user_activity",
        "Analyzes a user's activity logs for anomalous behavior.",
        Shape::new()
            .field(
                "user_name",
                FieldType::Str,
                "The name of the user whose activity is being analyzed.",
            )
            .field(
                "activity_logs",
                FieldType::Str,
                "A string containing user activity logs. This should include timestamps, IP \
                 addresses, and actions taken.",
            ),
        Shape::new()
            .field(
                "is_anomaly_detected",
                FieldType::Bool,
                "Whether or not any anomalous behavior was detected.",
            )
            .field("summary", FieldType::Str, "A high-level summary of the findings.")
            .field(
                "detailed_report",
                FieldType::Str,
                "A detailed, markdown-formatted report of the analysis, highlighting any \
                 suspicious activities and why they are considered anomalous.",
            ),
        "You are an expert cybersecurity analyst specializing in user behavior analytics. Your \
         task is to analyze the provided activity logs for a specific user to identify \
         anomalies.\n\n\
         The user's typical behavior is working weekdays, 9am-5pm PST from IP addresses in the \
         192.168.1.x range.\n\n\
         Look for deviations from this pattern, such as:\n\
         - Logins at unusual times (e.g., late at night, weekends).\n\
         - Logins from unrecognized or geographically distant IP addresses.\n\
         - Access to sensitive resources the user does not normally access.\n\
         - Rapid, repeated actions that might indicate automation or a compromised session.\n\
         - Any other activity that seems out of character for the user.\n\n\
         Based on your analysis, determine if an anomaly is detected. Provide a concise summary \
         and a detailed report in markdown format. If anomalies are found, the report must \
         specify which activities were suspicious and why they deviate from the user's typical \
         behavior.\n\n\
         User: {{{user_name}}}\n\nActivity Logs:\n{{{activity_logs}}}\n",
    )
}

/// Scores the risk of a user or IP address from recent activity.
///
/// The banding (Low 0-20, Medium 21-50, High 51-80, Critical 81-100) is
/// stated in the prompt and enforced by the service; the invoker validates
/// the returned level against the enum but never recomputes the band.
pub fn score_user_ip_risk() -> FlowDefinition {
    FlowDefinition::new(
        "score_user_ip_risk",
        "Scores the risk level of a user or IP address from activity data.",
        Shape::new()
            .field(
                "identifier",
                FieldType::Str,
                "The user name or IP address to be scored.",
            )
            .field(
                "activity_data",
                FieldType::Str,
                "A summary of activity associated with the identifier, e.g., \"Multiple failed \
                 logins from 3 countries in 1 hour\", \"Accessed and downloaded 5GB from a \
                 sensitive fileshare\".",
            ),
        Shape::new()
            .field(
                "risk_score",
                FieldType::Number,
                "A risk score from 0 (no risk) to 100 (critical risk).",
            )
            .field(
                "risk_level",
                FieldType::enumeration(RISK_LEVELS),
                "The categorized risk level.",
            )
            .field(
                "key_risk_factors",
                FieldType::Str,
                "A markdown-formatted list of the top factors contributing to the risk score.",
            )
            .field(
                "recommendation",
                FieldType::Str,
                "A recommended action based on the risk, e.g., \"Monitor activity\", \"Require \
                 MFA re-authentication\", \"Temporarily disable account\".",
            ),
        "You are a Senior Cybersecurity Analyst specializing in risk assessment and user \
         behavior analytics. Your task is to calculate a risk score for a given user or IP \
         address based on their recent activity.\n\n\
         Analyze the provided activity data and calculate a risk score from 0 to 100.\n\
         - 0-20: Low risk\n\
         - 21-50: Medium risk\n\
         - 51-80: High risk\n\
         - 81-100: Critical risk\n\n\
         Identify the key factors that contribute to this score and provide a clear \
         recommendation for action.\n\n\
         Identifier: {{identifier}}\nActivity Data:\n\"{{activity_data}}\"\n",
    )
}

/// Suggests hardening steps for a described system configuration.
pub fn suggest_security_improvements() -> FlowDefinition {
    FlowDefinition::new(
        "suggest_security_improvements",
        "Suggests security improvements from a system configuration and known vulnerabilities.",
        Shape::new()
            .field(
                "system_configuration",
                FieldType::Str,
                "Detailed information about the current system configuration, including \
                 operating systems, installed software, network settings, and user access \
                 privileges.",
            )
            .field(
                "known_vulnerabilities",
                FieldType::Str,
                "A list of known vulnerabilities relevant to the system, including CVE IDs and \
                 descriptions.",
            ),
        Shape::new()
            .field(
                "suggested_improvements",
                FieldType::Str,
                "A list of actionable security improvements, including specific steps and \
                 justifications.",
            )
            .field(
                "risk_assessment",
                FieldType::Str,
                "An assessment of the potential risks associated with not implementing the \
                 suggested improvements.",
            ),
        "You are an AI cybersecurity expert tasked with analyzing system configurations and \
         suggesting security improvements.\n\n\
         Based on the provided system configuration and known vulnerabilities, suggest \
         actionable security improvements. Include specific steps and justifications for each \
         improvement. Also, assess the potential risks of not implementing the suggested \
         improvements.\n\n\
         System Configuration:\n{{system_configuration}}\n\n\
         Known Vulnerabilities:\n{{known_vulnerabilities}}\n",
    )
}

/// Translates threat intelligence into likely phishing tactics and defenses.
pub fn anticipate_phishing() -> FlowDefinition {
    FlowDefinition::new(
        "anticipate_phishing",
        "Predicts likely phishing tactics and targets from threat intelligence.",
        Shape::new().field(
            "threat_intelligence",
            FieldType::Str,
            "A description of current phishing campaigns, targeted sectors, or new malware \
             being distributed via email.",
        ),
        Shape::new()
            .field(
                "predicted_tactics",
                FieldType::Str,
                "A markdown-formatted summary of the likely phishing tactics (e.g., fake login \
                 pages for Office 365, emails with malicious attachments disguised as invoices).",
            )
            .field(
                "likely_targets",
                FieldType::Str,
                "The departments or user roles most likely to be targeted (e.g., \"Finance \
                 department\", \"New employees\").",
            )
            .field(
                "recommended_actions",
                FieldType::Str,
                "A list of proactive steps to take, such as \"Block IOCs\", \"Run a \
                 simulation\", or \"Send a warning bulletin to specific users\".",
            ),
        "You are an expert cyber threat intelligence analyst. Your task is to analyze the \
         provided threat intelligence and predict how it might translate into specific phishing \
         attacks against our company.\n\n\
         Our company is a small-to-medium enterprise (SME) in the manufacturing sector.\n\n\
         Based on the threat intel, predict the following:\n\
         1. **Likely Tactics**: What specific methods will attackers use? (e.g., Spear phishing, \
         brand impersonation, malicious attachments). Be specific.\n\
         2. **Likely Targets**: Which departments or user roles are the most probable targets \
         for this type of attack within our company?\n\
         3. **Recommended Actions**: What concrete, proactive steps should we take to defend \
         against this threat?\n\n\
         Threat Intelligence:\n\"{{threat_intelligence}}\"\n",
    )
}

/// Forecasts future problems from time-series performance data.
pub fn predict_potential_issues() -> FlowDefinition {
    FlowDefinition::new(
        "predict_potential_issues",
        "Predicts potential future issues from time-series performance data.",
        Shape::new().field(
            "performance_data",
            FieldType::Json,
            "A JSON string representing an array of performance data points over time. Each \
             data point includes cpu, memory, and network usage.",
        ),
        Shape::new()
            .field(
                "prediction",
                FieldType::Str,
                "A summary of the potential issue predicted from the data, including what might \
                 happen and when.",
            )
            .field(
                "severity",
                FieldType::Str,
                "The predicted severity of the issue, rated as 'High', 'Medium', or 'Low'.",
            ),
        "You are an AI IT operations expert specializing in predictive analysis.\n\n\
         Analyze the following time-series performance data. Look for trends that indicate \
         potential future problems, such as resource exhaustion, sustained high usage, or \
         unusual patterns.\n\n\
         Based on your analysis, predict a potential future issue. Describe what might happen \
         and estimate a potential timeframe. Assign a severity level to the predicted issue.\n\n\
         If there are no obvious negative trends, state that the system is stable.\n\n\
         Performance Data:\n{{performance_data}}\n",
    )
}

/// Predicts component failure from hardware health metrics.
pub fn predict_hardware_failure() -> FlowDefinition {
    FlowDefinition::new(
        "predict_hardware_failure",
        "Predicts hardware failures from component health metrics.",
        Shape::new()
            .field(
                "component_type",
                FieldType::enumeration(["Disk", "Memory", "CPU"]),
                "The type of hardware component being analyzed.",
            )
            .field(
                "health_metrics",
                FieldType::Json,
                "A JSON string of relevant health metrics for the component (e.g., S.M.A.R.T. \
                 data for a disk, memory error counts, temperature logs for a CPU).",
            ),
        Shape::new()
            .field(
                "is_failure_predicted",
                FieldType::Bool,
                "Whether or not a failure is predicted within the near future.",
            )
            .field(
                "prediction_summary",
                FieldType::Str,
                "A concise summary of the prediction, e.g., \"Imminent disk failure due to high \
                 number of reallocated sectors.\"",
            )
            .field(
                "recommended_action",
                FieldType::Str,
                "The recommended action to take, e.g., \"Replace the disk immediately and \
                 restore from backup.\"",
            )
            .field(
                "confidence",
                FieldType::enumeration(CONFIDENCE),
                "The confidence level in the prediction.",
            ),
        "You are an expert hardware engineer and data scientist specializing in predictive \
         maintenance. Your task is to analyze health metrics from a hardware component and \
         predict if it is likely to fail.\n\n\
         Component Type: {{component_type}}\nHealth Metrics:\n{{{health_metrics}}}\n\n\
         Analyze the provided metrics for any signs of degradation or patterns that are \
         precursors to failure.\n\
         - For Disks, look at S.M.A.R.T. attributes like Reallocated Sectors Count, Command \
         Timeout, and Media Wearout Indicator.\n\
         - For Memory, look for ECC or CRC error counts.\n\
         - For CPUs, look for high core temperatures, thermal throttling, or L2/L3 cache \
         errors.\n\n\
         Based on your analysis, determine if a failure is likely. Provide a summary of your \
         findings, a recommended course of action, and your confidence level in this \
         prediction. If no failure is predicted, state that the component appears healthy.\n",
    )
}

/// Detects emerging widespread issues from ticket and activity patterns.
pub fn predict_support_needs() -> FlowDefinition {
    FlowDefinition::new(
        "predict_support_needs",
        "Predicts emerging support issues from recent tickets and activity logs.",
        Shape::new()
            .field(
                "support_tickets",
                FieldType::Str,
                "A string containing a list of recent IT support tickets, including user, date, \
                 and problem description.",
            )
            .field(
                "user_activity_logs",
                FieldType::Str,
                "A string containing relevant user activity logs that might correlate with \
                 support issues.",
            ),
        Shape::new()
            .field(
                "is_issue_predicted",
                FieldType::Bool,
                "Whether a potential widespread issue is predicted.",
            )
            .field(
                "emerging_issue",
                FieldType::Str,
                "A concise description of the predicted emerging issue.",
            )
            .field(
                "potential_impact",
                FieldType::Str,
                "An assessment of the potential impact (e.g., number of users affected, \
                 productivity loss).",
            )
            .field(
                "proactive_action",
                FieldType::Str,
                "A recommended proactive action to mitigate the issue, such as \"Draft a \
                 knowledge base article\" or \"Prepare a patch script.\"",
            )
            .field(
                "confidence",
                FieldType::enumeration(CONFIDENCE),
                "The confidence level in this prediction.",
            ),
        "You are an expert proactive IT Support Analyst. Your task is to analyze recent support \
         tickets and user activity logs to identify patterns that suggest an emerging, \
         widespread issue.\n\n\
         Look for:\n\
         - Multiple users reporting the same or similar problems.\n\
         - A gradual increase in tickets related to a specific software, feature, or recent \
         change.\n\
         - Correlation between a specific user activity (e.g., a software update) and \
         subsequent support requests.\n\n\
         Based on your analysis, determine if a widespread issue is likely. If so, describe the \
         issue, estimate its potential impact, recommend a proactive step to get ahead of it, \
         and state your confidence level.\n\n\
         If no pattern is detected, state that no emerging issues are predicted.\n\n\
         Recent Support Tickets:\n{{{support_tickets}}}\n\n\
         User Activity Logs:\n{{{user_activity_logs}}}\n",
    )
}

/// Correlates an alert with performance data and logs to find the root cause.
pub fn get_root_cause_analysis() -> FlowDefinition {
    FlowDefinition::new(
        "get_root_cause_analysis",
        "Performs root cause analysis for an alert from performance data and logs.",
        Shape::new()
            .field(
                "alert_description",
                FieldType::Str,
                "The description of the IT alert.",
            )
            .field(
                "performance_data",
                FieldType::Json,
                "A JSON string of relevant performance data points around the time of the alert.",
            )
            .field("logs", FieldType::Str, "Relevant logs from the time of the alert."),
        Shape::new()
            .field(
                "likely_cause",
                FieldType::Str,
                "A detailed explanation of the most likely root cause of the issue, based on \
                 the provided data.",
            )
            .field(
                "confidence",
                FieldType::enumeration(CONFIDENCE),
                "The confidence level in the analysis.",
            )
            .field(
                "suggested_remediation",
                FieldType::Str,
                "Actionable steps to remediate the issue.",
            ),
        "You are an expert Site Reliability Engineer (SRE). Your task is to perform a root \
         cause analysis for a given IT alert using the provided performance data and logs.\n\n\
         Alert: \"{{alert_description}}\"\n\n\
         Correlate the information from the performance data and logs to determine the most \
         probable cause.\n\
         - Look for unusual spikes or drops in performance metrics (CPU, memory, network) that \
         coincide with the alert.\n\
         - Scan logs for error messages, warnings, or anomalous activity that could explain \
         the alert.\n\
         - Synthesize the information to form a coherent and logical conclusion.\n\n\
         Based on your analysis, provide a detailed explanation of the likely root cause, your \
         confidence in the finding, and a set of suggested steps to fix the issue.\n\n\
         Performance Data:\n{{{performance_data}}}\n\nLogs:\n{{{logs}}}\n",
    )
}

/// Assesses the blast radius of a proposed change.
pub fn analyze_change_impact() -> FlowDefinition {
    FlowDefinition::new(
        "analyze_change_impact",
        "Analyzes the potential impact of a proposed change on an IT system.",
        Shape::new()
            .field(
                "change_description",
                FieldType::Str,
                "A detailed description of the proposed change (e.g., software update, firewall \
                 rule change).",
            )
            .field(
                "system_context",
                FieldType::Str,
                "Information about the current system state, including relevant configurations, \
                 dependencies, and architecture.",
            ),
        Shape::new()
            .field(
                "impact_analysis",
                FieldType::Str,
                "A detailed, markdown-formatted report of the potential impact, covering \
                 conflicts, dependencies, and security risks.",
            )
            .field(
                "risk_level",
                FieldType::enumeration(RISK_LEVELS),
                "The assessed risk level of the proposed change.",
            ),
        "You are an expert IT strategist and systems architect. Your task is to analyze the \
         potential impact of a proposed change on an IT system.\n\n\
         Evaluate the proposed change in the context of the current system state. Identify \
         potential risks, conflicts, and cascading failures.\n\n\
         Your analysis must cover:\n\
         - **Direct Impact**: What components will be directly affected?\n\
         - **Dependencies**: Which other services, applications, or users depend on the \
         affected components?\n\
         - **Conflicts**: Could this change conflict with other planned changes or existing \
         processes?\n\
         - **Security Risks**: Does this change introduce any new vulnerabilities or security \
         gaps?\n\
         - **Rollback Plan**: Briefly suggest the complexity of rolling back this change if \
         issues arise.\n\n\
         Assign a risk level to the change based on your analysis.\n\n\
         Proposed Change:\n\"{{change_description}}\"\n\n\
         System Context:\n{{{system_context}}}\n",
    )
}

/// Projects license demand and cost for the next quarter.
pub fn forecast_license_usage() -> FlowDefinition {
    FlowDefinition::new(
        "forecast_license_usage",
        "Forecasts software license needs and costs from historical usage.",
        Shape::new()
            .field(
                "software_name",
                FieldType::Str,
                "The name of the software being analyzed.",
            )
            .field(
                "current_licenses",
                FieldType::Number,
                "The number of licenses currently owned.",
            )
            .field(
                "license_cost",
                FieldType::Number,
                "The cost per license per month.",
            )
            .field(
                "historical_usage",
                FieldType::Json,
                "A JSON string representing an array of monthly active user counts for the past \
                 year.",
            ),
        Shape::new()
            .field(
                "predicted_users_next_quarter",
                FieldType::Number,
                "The predicted average number of active users for the next quarter.",
            )
            .field(
                "licenses_needed",
                FieldType::Number,
                "The total number of licenses recommended for the next quarter.",
            )
            .field(
                "license_shortfall",
                FieldType::Number,
                "The number of additional licenses that need to be purchased.",
            )
            .field(
                "predicted_cost_next_quarter",
                FieldType::Number,
                "The total predicted software cost for the next quarter (3 months).",
            )
            .field(
                "recommendation",
                FieldType::Str,
                "A summary of the forecast and a clear recommendation (e.g., \"Purchase X more \
                 licenses to meet projected demand.\").",
            ),
        "You are an expert IT asset manager and financial analyst. Your task is to forecast \
         software license needs and costs based on historical usage data.\n\n\
         Software: {{software_name}}\n\
         Current Licenses: {{current_licenses}}\n\
         Cost per License (Monthly): ${{license_cost}}\n\
         Historical Usage (monthly active users):\n{{{historical_usage}}}\n\n\
         Analyze the historical usage data to identify trends (e.g., growth rate, \
         seasonality).\n\
         1. Predict the average number of active users for the next quarter (next 3 months).\n\
         2. Recommend the total number of licenses needed to support the predicted usage, \
         including a small buffer (around 10-15%).\n\
         3. Calculate the license shortfall (licenses needed - current licenses). If there is \
         no shortfall, this should be 0.\n\
         4. Calculate the total predicted cost for the next quarter (3 months) based on the \
         recommended number of licenses.\n\
         5. Provide a concise recommendation based on your findings.\n",
    )
}

/// Generates a PowerShell or Bash script from a task description.
pub fn generate_task_script() -> FlowDefinition {
    FlowDefinition::new(
        "generate_task_script",
        "Generates an automation script from a natural-language task description.",
        Shape::new()
            .field(
                "task_description",
                FieldType::Str,
                "A natural language description of the task to be automated.",
            )
            .field(
                "os",
                FieldType::enumeration(["windows", "macos"]),
                "The target operating system for the script. Use 'windows' for PowerShell and \
                 'macos' for Bash.",
            ),
        Shape::new()
            .field(
                "script",
                FieldType::Str,
                "The generated script that performs the requested task.",
            )
            .field(
                "language",
                FieldType::Str,
                "The scripting language used (e.g., 'PowerShell' or 'Bash').",
            ),
        "You are an expert IT administrator and script writer. Your task is to generate a \
         script based on a natural language description of a task.\n\n\
         - If the target OS is 'windows', you must generate a PowerShell script.\n\
         - If the target OS is 'macos', you must generate a Bash (zsh compatible) script.\n\
         - The script should be robust, include comments where necessary, and perform the \
         requested task efficiently.\n\
         - Do not include any introductory or explanatory text in the script output, only the \
         code itself.\n\n\
         Task: \"{{task_description}}\"\nTarget OS: {{os}}\n",
    )
}

/// Drafts a formal IT policy document in Markdown.
pub fn generate_it_policy() -> FlowDefinition {
    FlowDefinition::new(
        "generate_it_policy",
        "Generates a formal IT policy document from a natural-language request.",
        Shape::new().field(
            "policy_description",
            FieldType::Str,
            "A natural language description of the IT policy required.",
        ),
        Shape::new().field(
            "policy_document",
            FieldType::Str,
            "The full, formatted IT policy document in Markdown format.",
        ),
        "You are an expert IT policy and compliance officer. Your task is to generate a \
         formal, comprehensive IT policy document based on a natural language request.\n\n\
         The policy document should be well-structured, clear, and professional. It should \
         include the following sections where applicable:\n\
         - **Policy Title**\n\
         - **Purpose**: Why the policy exists.\n\
         - **Scope**: Who the policy applies to.\n\
         - **Policy Statements**: The specific rules and guidelines.\n\
         - **Enforcement**: The consequences of non-compliance.\n\
         - **Definitions**: Clarification of key terms.\n\n\
         Format the entire output as a single Markdown document.\n\n\
         Policy Request: \"{{policy_description}}\"\n",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_holds_fifteen_flows() {
        assert_eq!(Catalog::standard().len(), 15);
    }

    #[test]
    fn test_catalog_lookup_by_name() {
        let catalog = Catalog::standard();
        assert!(catalog.get("summarize_alerts").is_some());
        assert!(catalog.get("score_user_ip_risk").is_some());
        assert!(catalog.get("no_such_flow").is_none());
    }

    #[test]
    fn test_flow_names_are_unique() {
        let catalog = Catalog::standard();
        let mut names: Vec<_> = catalog.names().collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), catalog.len());
    }

    #[test]
    fn test_every_template_placeholder_names_an_input_field() {
        for flow in Catalog::standard().iter() {
            let mut rest = flow.template.as_str();
            while let Some(start) = rest.find("{{") {
                let after = &rest[start..];
                let end = after.find("}}").expect("unbalanced placeholder");
                let name = after[..end].trim_matches(|c| c == '{' || c == '}');
                assert!(
                    flow.input.get(name).is_some(),
                    "flow '{}' template references unknown field '{}'",
                    flow.name,
                    name
                );
                rest = &after[end + 2..];
            }
        }
    }

    #[test]
    fn test_script_flow_constrains_target_os() {
        let flow = generate_task_script();
        let os = flow.input.get("os").unwrap();
        match &os.field_type {
            crate::core::shape::FieldType::Enum(values) => {
                assert_eq!(values, &vec!["windows".to_string(), "macos".to_string()]);
            }
            other => panic!("expected enum, got {:?}", other),
        }
    }
}
