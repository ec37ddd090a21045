use skyline_core::*;

#[test]
fn readers_see_the_latest_publish() {
    let (publisher, reader) = latest(1u32);
    let second = reader.clone();
    let third = publisher.reader();
    assert_eq!(reader.get(), 1);

    publisher.publish(2);
    publisher.publish(3);
    assert_eq!(reader.get(), 3);
    assert_eq!(second.get(), 3);
    assert_eq!(third.get(), 3);
    assert_eq!(publisher.current(), 3);
}

#[test]
fn ending_the_view_is_seen_by_every_token() {
    let life = ViewLifetime::new();
    let a = life.token();
    let b = a.clone();
    assert!(life.is_alive() && a.is_alive() && b.is_alive());
    life.end();
    assert!(!life.is_alive());
    assert!(!a.is_alive());
    assert!(!b.is_alive());
}

#[test]
fn dropping_the_view_ends_it() {
    let token = {
        let life = ViewLifetime::default();
        life.token()
    };
    assert!(!token.is_alive());
}
