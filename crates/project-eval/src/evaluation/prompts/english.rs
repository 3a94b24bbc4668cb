pub(super) fn template(key: &str) -> &'static str {
    match key {
        "strategic_fit" => STRATEGIC_FIT,
        "business_value" => BUSINESS_VALUE,
        "scalability" => SCALABILITY,
        "duration_complexity" => PROJECTED_TIMELINE,
        "team_footprint" => TEAM_FOOTPRINT,
        "external_dependence" => EXTERNAL_DEPENDENCE,
        "scope_definition" => SCOPE_DEFINITION,
        "critical_talent" => CRITICAL_TALENT,
        "innovation_complexity" => INNOVATION_COMPLEXITY,
        "implementation_failure" => IMPLEMENTATION_FAILURE,
        _ => FALLBACK,
    }
}

const FALLBACK: &str = "Project:\n{project_text}\n\n\
Return JSON only: {{\"score_1_to_5\": float, \"reason\": str}}";

const STRATEGIC_FIT: &str = concat!(
    "Project:\n{project_text}\n\n",
    "Evaluate Strategic Fit (1–5) of the project above. Consider:\n",
    "- Alignment to company strategy and core objectives\n",
    "**Past Project Example:**\n",
    "Project: {past_project_name}\n",
    "Company: {past_project_company}\n",
    "Scope & Objectives: {past_project_scope_and_objectives}\n",
    "**Past Evaluation (Strategic Fit):** {past_metric_evaluation}\n",
    "Score: {past_metric_score}\n",
    "Return JSON only: {{\"score_1_to_5\": float, \"reason\": str}}"
);

const BUSINESS_VALUE: &str = concat!(
    "Project:\n{project_text}\n\n",
    "Evaluate Business Value (1–5) of the project above. Consider:\n",
    "- Expected measurable benefits\n",
    "- Stakeholder impact and outcomes\n",
    "**Past Project Example:**\n",
    "Project: {past_project_name}\n",
    "Business Value Contribution: {past_project_business_value_contribution}\n",
    "**Past Evaluation (Business Value Contribution):** {past_metric_evaluation}\n",
    "Score: {past_metric_score}\n",
    "Return JSON only: {{\"score_1_to_5\": float, \"reason\": str}}"
);

const SCALABILITY: &str = concat!(
    "Project:\n{project_text}\n\n",
    "Evaluate Scalability (1–5) of the project above. Consider:\n",
    "- Operational readiness for scale\n",
    "**Past Project Example:**\n",
    "Project: {past_project_name}\n",
    "Scalability & Replicability Potential: {past_project_scalability_data_scope}\n",
    "**Past Evaluation (Scalability & Replicability Potential):** {past_metric_evaluation}\n",
    "Score: {past_metric_score}\n",
    "Return JSON only: {{\"score_1_to_5\": float, \"reason\": str}}"
);

const PROJECTED_TIMELINE: &str = concat!(
    "Project:\n{project_text}\n\n",
    "Evaluate Projected Timeline realism (1–5) of the project above. Consider:\n",
    "- Estimated duration vs scope and constraints\n",
    "- Milestones / critical path clarity\n",
    "- External dependencies and sequencing\n",
    "**Past Project Example:**\n",
    "Project: {past_project_name}\n",
    "Projected Timeline: {past_project_data_scope}\n",
    "**Past Evaluation (Projected Timeline):** {past_metric_evaluation}\n",
    "Score: {past_metric_score}\n",
    "Return JSON only: {{\"score_1_to_5\": float, \"reason\": str}}"
);

const TEAM_FOOTPRINT: &str = concat!(
    "Project:\n{project_text}\n\n",
    "Evaluate Team Footprint (1–5) of the project above. Consider:\n",
    "- Required roles and seniority\n",
    "- Effort intensity across functions\n",
    "Current staff: {current_staff}\n",
    "Return JSON only: {{\"score_1_to_5\": float, \"reason\": str}}"
);

const EXTERNAL_DEPENDENCE: &str = concat!(
    "Project:\n{project_text}\n\n",
    "Evaluate External Dependence (1–5) of the project above. Consider:\n",
    "- Vendor reliance and constraints\n",
    "- External blockers and risks\n",
    "**Past Project Example:**\n",
    "Project: {past_project_name}\n",
    "Data Scope: {past_project_data_scope}\n",
    "Stakeholders: {past_project_stakeholders}\n",
    "**Past Evaluation (External Resource Dependency):** {past_metric_evaluation}\n",
    "Score: {past_metric_score}\n",
    "Return JSON only: {{\"score_1_to_5\": float, \"reason\": str}}"
);

const SCOPE_DEFINITION: &str = concat!(
    "Project:\n{project_text}\n\n",
    "Evaluate Scope Definition (1–5) of the project above. Consider:\n",
    "- Clear scope and success criteria\n",
    "- Crisp problem statement\n",
    "**Past Project Example:**\n",
    "Project: {past_project_name}\n",
    "Data Scope: {past_project_data_scope}\n",
    "Scope & Objectives: {past_project_scope_and_objectives}\n",
    "**Past Evaluation (Scope Definition):** {past_metric_evaluation}\n",
    "Score: {past_metric_score}\n",
    "Return JSON only: {{\"score_1_to_5\": float, \"reason\": str}}"
);

const CRITICAL_TALENT: &str = concat!(
    "Project:\n{project_text}\n\n",
    "Evaluate Critical Talent (1–5) of the project above. Consider:\n",
    "- Scarce skills and bottlenecks\n",
    "- Ownership clarity\n",
    "Current staff: {current_staff}\n",
    "**Past Project Example:**\n",
    "Project: {past_project_name}\n",
    "Scope & Objectives: {past_project_scope_and_objectives}\n",
    "**Past Evaluation (Critical Talent):** {past_metric_evaluation}\n",
    "Score: {past_metric_score}\n",
    "Return JSON only: {{\"score_1_to_5\": float, \"reason\": str}}"
);

const INNOVATION_COMPLEXITY: &str = concat!(
    "Project:\n{project_text}\n\n",
    "Evaluate Innovation Complexity (1–5) of the project above. Consider:\n",
    "- Technical unknowns/R&D needs\n",
    "- Feasibility uncertainty\n",
    "**Past Project Example:**\n",
    "Project: {past_project_name}\n",
    "Scope & Objectives: {past_project_scope_and_objectives}\n",
    "**Past Evaluation (Innovation Complexity):** {past_metric_evaluation}\n",
    "Score: {past_metric_score}\n",
    "Return JSON only: {{\"score_1_to_5\": float, \"reason\": str}}"
);

const IMPLEMENTATION_FAILURE: &str = concat!(
    "Project:\n{project_text}\n\n",
    "Evaluate Implementation Failure (1–5) of the project above. Consider:\n",
    "- Execution gaps and change risks\n",
    "- Adoption and rollout barriers\n",
    "**Past Project Example:**\n",
    "Project: {past_project_name}\n",
    "Scope & Objectives: {past_project_scope_and_objectives}\n",
    "**Past Evaluation (Implementation Failure):** {past_metric_evaluation}\n",
    "Score: {past_metric_score}\n",
    "Return JSON only: {{\"score_1_to_5\": float, \"reason\": str}}"
);
