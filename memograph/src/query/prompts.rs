//! Prompt templates for query generation and answer rendering.

use crate::graph::{QueryRow, SCHEMA_DESCRIPTION};
use crate::llm::ChatMessage;

/// System prompt for generating a Cypher query from a question.
pub fn query_generation_prompt() -> String {
    format!(
        r#"You are an expert in Cypher query language and Neo4j graph databases.
Given a user's natural language question, generate a Cypher query that answers the question based on the following graph schema:

{SCHEMA_DESCRIPTION}

IMPORTANT: For person names, use partial matching with CONTAINS to support both full names and given names.
Example: "최대련" and "대련" should both match. Use: WHERE p.name CONTAINS "대련"

Return ONLY the Cypher query, without any additional text or explanations.
Ensure the query is valid and executable.
Example queries:
- "김성길 전화번호?": MATCH (p:Person) WHERE p.name CONTAINS "김성길" RETURN p.phone;
- "대련님 전화번호?": MATCH (p:Person) WHERE p.name CONTAINS "대련" RETURN p.phone;
- "ABC상사에 누가 있지?": MATCH (p:Person)-[:WORKS_AT]->(c:Company {{name:"ABC상사"}}) RETURN p.name, p.title;
- "최근에 누구 만났지?": MATCH (p:Person)-[:MENTIONED_IN]->(m:Memo) WHERE m.timestamp > datetime() - duration('P7D') RETURN p.name, m.timestamp ORDER BY m.timestamp DESC;
- "최대련님과 뭘 해야하지?": MATCH (p:Person)-[:ATTENDED]->(e:Event) WHERE p.name CONTAINS "대련" RETURN e.name, e.date ORDER BY e.date;"#
    )
}

/// System prompt for rendering query results into a conversational answer.
const RENDER_PROMPT: &str = r#"You are a helpful assistant that converts database query results into natural language responses.
Given the user's question and the query results, provide a clear, concise answer in Korean.
If there are no results, say "관련 정보를 찾을 수 없습니다."
Be conversational and friendly."#;

/// Build the rendering conversation for a question and its result rows.
pub fn render_messages(question: &str, rows: &[QueryRow]) -> Vec<ChatMessage> {
    let results = serde_json::to_string_pretty(rows).unwrap_or_else(|_| "[]".to_string());
    vec![
        ChatMessage::system(RENDER_PROMPT),
        ChatMessage::user(format!(
            "Question: {question}\n\nQuery Results: {results}"
        )),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn generation_prompt_embeds_schema() {
        let prompt = query_generation_prompt();
        assert!(prompt.contains("Person {name: string"));
        assert!(prompt.contains("(Person)-[:WORKS_AT]->(Company)"));
    }

    #[test]
    fn render_messages_carry_question_and_rows() {
        let rows = vec![
            json!({"phone": "010-2222-1234"}).as_object().unwrap().clone(),
        ];
        let messages = render_messages("김성길 전화번호?", &rows);
        assert_eq!(messages.len(), 2);
        assert!(messages[1].content.contains("김성길 전화번호?"));
        assert!(messages[1].content.contains("010-2222-1234"));
    }
}
