//! Prompt templates for the extraction collaborators.

use chrono::{DateTime, Local};

/// System prompt for memo entity/relationship extraction.
///
/// The current date and time are injected so the model can resolve relative
/// expressions ("내일", "다음주 월요일") to absolute ISO values.
pub fn extraction_prompt(now: &DateTime<Local>) -> String {
    let current_date = now.format("%Y-%m-%d");
    let current_time = now.format("%H:%M");
    format!(
        r#"You are a helpful assistant that extracts entities and relationships from a given memo.
The entities can be Person, Company, Event, Project.
The relationships can be WORKS_AT, ATTENDED, DISCUSSED.

IMPORTANT: Current date is {current_date} and current time is {current_time}.
When extracting dates and times, convert relative dates to absolute dates:
- "오늘" → {current_date}
- "내일" → add 1 day to {current_date}
- "모레" → add 2 days to {current_date}
- "다음주 월요일" → calculate next Monday from {current_date}

For times, convert to 24-hour format:
- "14시" → "14:00"
- "오후 3시" → "15:00"
- "오전 9시" → "09:00"

For Event entities, include both date and time in ISO format if available:
- If only date: "2026-02-02"
- If date and time: "2026-02-02T14:00:00"

Return the output in JSON format, following this schema:
{{
  "entities": [
    {{ "type": "Person", "name": "김성길", "title": "과장", "phone": "010-1234-5678", "email": "kim@abc.com" }},
    {{ "type": "Company", "name": "ABC상사" }},
    {{ "type": "Event", "name": "미팅", "date": "2026-02-02T14:00:00" }},
    {{ "type": "Project", "name": "신규 프로젝트" }}
  ],
  "relationships": [
    {{ "from": "김성길", "to": "ABC상사", "type": "WORKS_AT" }},
    {{ "from": "김성길", "to": "미팅", "type": "ATTENDED" }},
    {{ "from": "미팅", "to": "신규 프로젝트", "type": "DISCUSSED" }}
  ],
  "business_related": true
}}
If the memo is not business related, set "business_related" to false and return empty entities and relationships."#
    )
}

/// System prompt for structuring raw business-card text.
pub const CONTACT_PROMPT: &str = r#"You are an expert assistant that extracts key information from business card text.
The user will provide the text content of a business card.
Extract the following fields: name, title, company, phone, email.
Handle various phone number formats including international ones like '82 10-0000-0000'.
Return the output in a clean JSON format. For example:
{
  "name": "김성길",
  "title": "과장",
  "company": "ABC상사",
  "phone": "010-2222-1234",
  "email": "kim@abc.com"
}
If a field is not found, omit it from the JSON. The name must be in Korean."#;
