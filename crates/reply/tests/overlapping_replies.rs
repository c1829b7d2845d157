use std::time::Duration;

use gptchat_reply::{
    DEMO_REPLY_TEXT, HistoryMessage, ReplyEventPayload, ReplyHandle, ReplyRequest, ReplyTrigger,
    Role, create_generator,
};

fn request(trigger: u64, text: &str) -> ReplyRequest {
    ReplyRequest::new(
        ReplyTrigger::new(trigger),
        vec![HistoryMessage::new(Role::User, text)],
    )
}

#[tokio::test(start_paused = true)]
async fn each_send_gets_its_own_reply() {
    let generator = create_generator(Duration::from_millis(1000)).unwrap();

    let ReplyHandle {
        events: mut first,
        worker,
    } = generator.generate(request(2, "a")).unwrap();
    tokio::spawn(worker);

    tokio::time::sleep(Duration::from_millis(10)).await;

    let ReplyHandle {
        events: mut second,
        worker,
    } = generator.generate(request(3, "b")).unwrap();
    tokio::spawn(worker);

    let first_event = first.recv().await.unwrap();
    let second_event = second.recv().await.unwrap();

    assert_eq!(first_event.trigger, ReplyTrigger::new(2));
    assert_eq!(second_event.trigger, ReplyTrigger::new(3));
    for event in [first_event, second_event] {
        assert_eq!(
            event.payload,
            ReplyEventPayload::Done(DEMO_REPLY_TEXT.to_string())
        );
    }

    // One event per request, then the channel closes.
    assert_eq!(first.recv().await, None);
    assert_eq!(second.recv().await, None);
}

#[tokio::test(start_paused = true)]
async fn configured_delay_is_reported() {
    let generator = create_generator(Duration::from_millis(250)).unwrap();
    assert_eq!(generator.delay(), Duration::from_millis(250));
    assert_eq!(generator.id(), "demo");
}
