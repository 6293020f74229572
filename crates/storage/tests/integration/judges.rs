use storage::repository::judge::JudgeRepository;

use crate::common::TestDb;

#[tokio::test]
async fn reinvite_returns_the_same_assignment() {
    let t = TestDb::spawn().await;
    let category = t.create_category("Best Robotics").await;
    let id = category.category.category_id;
    let judges = JudgeRepository::new(t.pool());

    let first = judges.invite("grace@example.com", Some("Grace"), id).await.unwrap();
    let second = judges.invite("  Grace@Example.com ", None, id).await.unwrap();

    assert!(first.created);
    assert!(!second.created);
    assert_eq!(first.assignment.invite_token, second.assignment.invite_token);
    assert_eq!(first.assignment.assignment_id, second.assignment.assignment_id);
    assert_eq!(second.judge.name.as_deref(), Some("Grace"));
    assert_eq!(
        t.count("SELECT COUNT(*) FROM judge_assignments WHERE category_id = $1", id)
            .await,
        1
    );
}

#[tokio::test]
async fn one_judge_gets_a_token_per_category() {
    let t = TestDb::spawn().await;
    let a = t.create_category("A").await;
    let b = t.create_category("B").await;
    let judges = JudgeRepository::new(t.pool());

    let in_a = judges
        .invite("grace@example.com", None, a.category.category_id)
        .await
        .unwrap();
    let in_b = judges
        .invite("grace@example.com", None, b.category.category_id)
        .await
        .unwrap();

    assert!(in_b.created);
    assert_eq!(in_a.judge.user_id, in_b.judge.user_id);
    assert_ne!(in_a.assignment.invite_token, in_b.assignment.invite_token);
}
