use noteai::request::{
  build_messages, system_prompt, ChatCompletionBody, CONTEXT_PREFIX,
  TEMPERATURE,
};
use noteai::{ChatMessage, CompletionRequest, Purpose, Role, WritingMode};

#[test]
fn test_system_prompt_by_purpose()
{   let formula = system_prompt(Purpose::Formula, "English");
    assert!(formula.contains("LaTeX"));
    assert!(!formula.contains("English"));

    let writing = system_prompt(Purpose::Writing, "English");
    assert!(writing.contains("no commentary"));
    assert!(writing.contains("Respond in English"));

    let general = system_prompt(Purpose::General, "French");
    assert!(general.contains("Respond in French"));
}

#[test]
fn test_messages_without_context_or_history()
{   let request = CompletionRequest::general("What is 2+2?");
    let messages = build_messages(&request, "English");

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, Role::System);
    assert_eq!(messages[1], ChatMessage::user("What is 2+2?"));
}

#[test]
fn test_context_precedes_prompt()
{   let request = CompletionRequest::writing(
      "draft text",
      Some("note about sets".to_string()),
      WritingMode::Improve
    );
    let messages = build_messages(&request, "English");

    assert_eq!(messages.len(), 3);
    assert_eq!(
      messages[1].content,
      format!("{}note about sets", CONTEXT_PREFIX)
    );
    assert_eq!(messages[1].role, Role::User);
    assert!(messages[2].content.ends_with("\n\ndraft text"));
}

#[test]
fn test_empty_context_is_skipped()
{   let request = CompletionRequest::chat(
      "hi", Some(String::new()), vec![]
    );
    assert_eq!(build_messages(&request, "English").len(), 2);
}

#[test]
fn test_history_keeps_order_after_context()
{   let history = vec![
      ChatMessage::user("first question"),
      ChatMessage::assistant("first answer"),
    ];
    let request = CompletionRequest::chat(
      "follow up",
      Some("ctx".to_string()),
      history.clone()
    );
    let messages = build_messages(&request, "English");

    let roles: Vec<Role> = messages.iter().map(|m| m.role).collect();
    assert_eq!(
      roles,
      vec![Role::System, Role::User, Role::User, Role::Assistant, Role::User]
    );
    assert_eq!(messages[1].content, "Context: ctx");
    assert_eq!(&messages[2..4], &history[..]);
    assert_eq!(messages[4].content, "follow up");
}

#[test]
fn test_formula_request()
{   let request = CompletionRequest::formula("area of a circle");
    assert_eq!(request.purpose, Purpose::Formula);
    assert!(request.prompt_text.ends_with("area of a circle"));
    assert!(request.context_text.is_none());
    assert!(request.history.is_empty());
}

#[test]
fn test_writing_modes_have_distinct_instructions()
{   let modes = [
      WritingMode::Improve,
      WritingMode::Expand,
      WritingMode::Summarize,
      WritingMode::Explain,
    ];
    for (i, a) in modes.iter().enumerate()
    {   for b in &modes[i + 1..]
        {   assert_ne!(a.instruction(), b.instruction());
        }
    }
    assert_eq!(WritingMode::default(), WritingMode::Improve);
}

#[test]
fn test_body_wire_format()
{   let body = ChatCompletionBody::new(
      "gpt-5-chat-free",
      vec![ChatMessage::system("sys"), ChatMessage::user("hi")]
    );
    let value = serde_json::to_value(&body).unwrap();

    assert_eq!(value["model"], "gpt-5-chat-free");
    assert_eq!(value["messages"][0]["role"], "system");
    assert_eq!(value["messages"][1]["role"], "user");
    assert_eq!(value["messages"][1]["content"], "hi");
    assert_eq!(body.temperature, TEMPERATURE);
    assert!((value["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
}
