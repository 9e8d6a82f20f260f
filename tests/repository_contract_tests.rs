mod common;

use std::collections::HashSet;

use serde_json::json;

use apex_quiz_server::{
    errors::AppError,
    models::domain::{
        ApprovalStatus, Attempt, AttemptAnswer, Category, Quiz, QuizMode, QuizQuestionRef, User,
        UserRole,
    },
    repositories::{
        AttemptRepository, CategoryRepository, QuestionRepository, QuizRepository,
        SystemConfigRepository, UserRepository,
    },
};
use common::*;

fn make_quiz(title: &str, created_by: &str) -> Quiz {
    Quiz::new(
        title,
        None,
        created_by,
        QuizMode::Manual,
        vec![QuizQuestionRef {
            question_id: "q1".to_string(),
            score: 1,
        }],
        None,
    )
}

fn make_attempt(student_id: &str, quiz_id: &str) -> Attempt {
    Attempt::new(
        student_id,
        quiz_id,
        vec![AttemptAnswer {
            question_id: "q1".to_string(),
            selected_option_id: "o1".to_string(),
        }],
        1,
        None,
    )
}

#[tokio::test]
async fn user_repository_uniqueness_filters_and_update() {
    let stores = Stores::default();
    let repo = &stores.users;

    let coach = seed_approved_coach(&stores, "coach@example.com").await;
    let pending = repo
        .create(User::new("Pending", "pending@example.com", "h", UserRole::Coach, None))
        .await
        .expect("create pending coach");
    seed_student(&stores, Some(&coach), "one@example.com").await;
    seed_student(&stores, Some(&coach), "two@example.com").await;
    seed_student(&stores, None, "free@example.com").await;

    let duplicate = repo
        .create(User::new("Again", "coach@example.com", "h", UserRole::Coach, None))
        .await;
    assert!(matches!(duplicate, Err(AppError::AlreadyExists(_))));

    let found = repo
        .find_by_email("coach@example.com")
        .await
        .expect("find by email should work");
    assert_eq!(found.map(|u| u.id), Some(coach.id.clone()));

    let all_coaches = repo
        .list_by_role(UserRole::Coach, None)
        .await
        .expect("list coaches should work");
    assert_eq!(all_coaches.len(), 2);
    assert_eq!(all_coaches[0].id, pending.id);

    let pending_only = repo
        .list_by_role(UserRole::Coach, Some(ApprovalStatus::Pending))
        .await
        .expect("list pending should work");
    assert_eq!(pending_only.len(), 1);

    assert_eq!(repo.count_by_role(UserRole::Student).await.unwrap(), 3);
    assert_eq!(repo.count_students_of(&coach.id).await.unwrap(), 2);
    assert_eq!(repo.list_students_of(&coach.id).await.unwrap().len(), 2);

    let mut approved = pending.clone();
    approved.status = ApprovalStatus::Approved;
    let updated = repo.update(approved).await.expect("update should work");
    assert_eq!(updated.status, ApprovalStatus::Approved);

    let ghost = User::new("Ghost", "ghost@example.com", "h", UserRole::Student, None);
    let missing_update = repo.update(ghost).await;
    assert!(matches!(missing_update, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn category_repository_scopes_names_per_coach() {
    let stores = Stores::default();
    let coach = seed_approved_coach(&stores, "coach@example.com").await;
    let rival = seed_approved_coach(&stores, "rival@example.com").await;

    let physics = seed_category(&stores, &coach, "Physics").await;
    seed_category(&stores, &rival, "Physics").await;

    let duplicate = stores
        .categories
        .create(Category::new("Physics", &coach.id))
        .await;
    assert!(matches!(duplicate, Err(AppError::AlreadyExists(_))));

    let owned = stores
        .categories
        .find_owned(&physics.id, &coach.id)
        .await
        .expect("find owned should work");
    assert!(owned.is_some());

    let stolen = stores
        .categories
        .find_owned(&physics.id, &rival.id)
        .await
        .expect("find owned should work");
    assert!(stolen.is_none());

    assert_eq!(stores.categories.list_by_creator(&coach.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn question_repository_ownership_sampling_and_usage() {
    let stores = Stores::default();
    let coach = seed_approved_coach(&stores, "coach@example.com").await;
    let rival = seed_approved_coach(&stores, "rival@example.com").await;
    let physics = seed_category(&stores, &coach, "Physics").await;
    let chemistry = seed_category(&stores, &coach, "Chemistry").await;
    let theirs = seed_category(&stores, &rival, "Physics").await;

    let mut physics_ids = Vec::new();
    for _ in 0..4 {
        physics_ids.push(seed_question(&stores, &coach, &physics, 1, 0).await.id);
    }
    let chem = seed_question(&stores, &coach, &chemistry, 2, 1).await;
    let foreign = seed_question(&stores, &rival, &theirs, 3, 2).await;

    let owned = stores
        .questions
        .find_owned_by_ids(&coach.id, &[chem.id.clone(), foreign.id.clone()])
        .await
        .expect("owned lookup should work");
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].id, chem.id);

    let filtered = stores
        .questions
        .list_by_creator(&coach.id, Some(&chemistry.id))
        .await
        .expect("filtered list should work");
    assert_eq!(filtered.len(), 1);

    let sample = stores
        .questions
        .sample_by_category(&coach.id, &physics.id, 3)
        .await
        .expect("sample should work");
    let distinct: HashSet<_> = sample.iter().map(|q| q.id.clone()).collect();
    assert_eq!(sample.len(), 3);
    assert_eq!(distinct.len(), 3);
    assert!(distinct.iter().all(|id| physics_ids.contains(id)));

    let short = stores
        .questions
        .sample_by_category(&coach.id, &physics.id, 10)
        .await
        .expect("sample should work");
    assert_eq!(short.len(), 4);

    let counts = stores
        .questions
        .count_by_category(&coach.id)
        .await
        .expect("count by category should work");
    assert_eq!(counts.get(&physics.id), Some(&4));
    assert_eq!(counts.get(&chemistry.id), Some(&1));
    assert!(!counts.contains_key(&theirs.id));

    stores.questions.increment_usage(&chem.id).await.unwrap();
    stores.questions.increment_usage(&chem.id).await.unwrap();
    stores.questions.increment_usage("missing").await.unwrap();
    assert_eq!(stores.questions.usage_of(&chem.id).await, 2);
    assert_eq!(stores.questions.total_usage().await.unwrap(), 2);
    assert_eq!(stores.questions.count_all().await.unwrap(), 6);
}

#[tokio::test]
async fn quiz_repository_flags_and_marketplace_paging() {
    let stores = Stores::default();
    let repo = &stores.quizzes;

    let first = repo.create(make_quiz("Algebra", "coach-a")).await.unwrap();
    let second = repo.create(make_quiz("Geometry", "coach-a")).await.unwrap();
    repo.create(make_quiz("Algebra drills", "coach-b")).await.unwrap();

    let newest_first = repo.list_by_creator("coach-a").await.unwrap();
    assert_eq!(newest_first[0].id, second.id);
    assert_eq!(repo.count_by_creator("coach-a").await.unwrap(), 2);

    let foreign_toggle = repo.set_active(&first.id, "coach-b", false).await.unwrap();
    assert!(foreign_toggle.is_none());

    let hidden = repo
        .set_active(&first.id, "coach-a", false)
        .await
        .unwrap()
        .expect("owner toggles quiz");
    assert!(!hidden.is_active);
    assert_eq!(repo.list_active_by_creator("coach-a").await.unwrap().len(), 1);

    let paid = repo
        .set_paid(&second.id, true)
        .await
        .unwrap()
        .expect("quiz exists");
    assert!(paid.is_paid);
    assert!(repo.set_paid("missing", true).await.unwrap().is_none());

    let (page, total) = repo.list_active_paginated(None, 0, 1).await.unwrap();
    assert_eq!(total, 2);
    assert_eq!(page.len(), 1);

    let (found, total) = repo
        .list_active_paginated(Some("ALGEBRA"), 0, 10)
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(found[0].title, "Algebra drills");

    let (beyond, total) = repo.list_active_paginated(None, 10, 10).await.unwrap();
    assert!(beyond.is_empty());
    assert_eq!(total, 2);
}

#[tokio::test]
async fn attempt_repository_lists_by_student_and_quiz() {
    let stores = Stores::default();
    let repo = &stores.attempts;

    let a1 = repo.create(make_attempt("student-a", "quiz-1")).await.unwrap();
    let a2 = repo.create(make_attempt("student-a", "quiz-2")).await.unwrap();
    repo.create(make_attempt("student-b", "quiz-3")).await.unwrap();

    assert!(repo.find_by_id(&a1.id).await.unwrap().is_some());
    assert!(repo.find_by_id("missing").await.unwrap().is_none());

    let mine = repo.list_by_student("student-a").await.unwrap();
    assert_eq!(mine.len(), 2);
    assert_eq!(mine[0].id, a2.id);

    let by_quizzes = repo
        .list_by_quizzes(&["quiz-1".to_string(), "quiz-3".to_string()])
        .await
        .unwrap();
    assert_eq!(by_quizzes.len(), 2);
    assert_eq!(repo.list_all().await.unwrap().len(), 3);
}

#[tokio::test]
async fn system_config_repository_upserts_by_key() {
    let stores = Stores::default();
    let repo = &stores.system_config;

    repo.upsert("REVENUE_SHARE_PERCENTAGE", json!(90)).await.unwrap();
    repo.upsert("MAINTENANCE", json!(false)).await.unwrap();
    let replaced = repo
        .upsert("REVENUE_SHARE_PERCENTAGE", json!(70))
        .await
        .unwrap();
    assert_eq!(replaced.value, json!(70));

    let stored = repo
        .find_by_key("REVENUE_SHARE_PERCENTAGE")
        .await
        .unwrap()
        .expect("key exists");
    assert_eq!(stored.as_f64(), Some(70.0));

    let all = repo.list_all().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].key, "MAINTENANCE");
}
