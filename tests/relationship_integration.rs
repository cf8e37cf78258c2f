//! Integration tests for the follow/follower relationship engine.
//!
//! Exercises the handlers end-to-end over the in-memory store and checks the
//! cross-aggregate invariant: after any quiesced sequence of operations, an
//! edge in one user's following set has its mirror in the counterparty's
//! follower set.

use std::sync::Arc;

use proptest::prelude::*;

use learnhub::adapters::store::InMemoryUserRepository;
use learnhub::application::handlers::relationship::{
    FollowUserCommand, FollowUserHandler, ListFollowCandidatesHandler, ListFollowCandidatesQuery,
    UnfollowUserCommand, UnfollowUserHandler,
};
use learnhub::domain::foundation::UserId;
use learnhub::domain::user::{User, UserError};
use learnhub::ports::UserRepository;

fn uid(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

async fn seeded_repo(ids: &[&str]) -> Arc<InMemoryUserRepository> {
    let repo = Arc::new(InMemoryUserRepository::new());
    for id in ids {
        repo.save(&User::new(uid(id), format!("{}@example.com", id), None))
            .await
            .unwrap();
    }
    repo
}

async fn assert_graph_symmetric(repo: &InMemoryUserRepository) {
    let users = repo.find_all().await.unwrap();
    for user in &users {
        for followed in user.following() {
            let other = repo
                .find_by_id(followed)
                .await
                .unwrap()
                .unwrap_or_else(|| panic!("dangling edge to {}", followed));
            assert!(
                other.followers().contains(user.id()),
                "{} follows {} but the mirror edge is missing",
                user.id(),
                followed
            );
        }
        for follower in user.followers() {
            let other = repo.find_by_id(follower).await.unwrap().unwrap();
            assert!(
                other.is_following(user.id()),
                "{} has follower {} but the mirror edge is missing",
                user.id(),
                follower
            );
        }
    }
}

#[tokio::test]
async fn follow_then_unfollow_round_trip_is_symmetric() {
    let repo = seeded_repo(&["alice", "bob"]).await;
    let follow = FollowUserHandler::new(repo.clone());
    let unfollow = UnfollowUserHandler::new(repo.clone());

    follow
        .handle(FollowUserCommand {
            actor_id: uid("alice"),
            target_id: uid("bob"),
        })
        .await
        .unwrap();
    assert_graph_symmetric(&repo).await;

    unfollow
        .handle(UnfollowUserCommand {
            actor_id: uid("alice"),
            target_id: uid("bob"),
        })
        .await
        .unwrap();
    assert_graph_symmetric(&repo).await;

    let alice = repo.find_by_id(&uid("alice")).await.unwrap().unwrap();
    assert!(alice.following().is_empty());
}

#[tokio::test]
async fn repeated_follows_do_not_duplicate_edges() {
    let repo = seeded_repo(&["alice", "bob"]).await;
    let follow = FollowUserHandler::new(repo.clone());

    for _ in 0..3 {
        follow
            .handle(FollowUserCommand {
                actor_id: uid("alice"),
                target_id: uid("bob"),
            })
            .await
            .unwrap();
    }

    let bob = repo.find_by_id(&uid("bob")).await.unwrap().unwrap();
    assert_eq!(bob.followers().len(), 1);
    assert_graph_symmetric(&repo).await;
}

#[tokio::test]
async fn self_follow_is_rejected_at_the_boundary() {
    let repo = seeded_repo(&["alice"]).await;
    let follow = FollowUserHandler::new(repo.clone());

    let err = follow
        .handle(FollowUserCommand {
            actor_id: uid("alice"),
            target_id: uid("alice"),
        })
        .await
        .unwrap_err();
    assert_eq!(err, UserError::SelfReference);
    assert_graph_symmetric(&repo).await;
}

#[tokio::test]
async fn candidates_shrink_as_the_graph_fills() {
    let repo = seeded_repo(&["alice", "bob", "carol"]).await;
    let follow = FollowUserHandler::new(repo.clone());
    let candidates = ListFollowCandidatesHandler::new(repo.clone());
    let query = || ListFollowCandidatesQuery {
        actor_id: uid("alice"),
    };

    assert_eq!(candidates.handle(query()).await.unwrap().len(), 2);

    follow
        .handle(FollowUserCommand {
            actor_id: uid("alice"),
            target_id: uid("bob"),
        })
        .await
        .unwrap();
    assert_eq!(candidates.handle(query()).await.unwrap().len(), 1);

    // An incoming edge also removes the counterparty from the candidates.
    follow
        .handle(FollowUserCommand {
            actor_id: uid("carol"),
            target_id: uid("alice"),
        })
        .await
        .unwrap();
    assert!(candidates.handle(query()).await.unwrap().is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Property: any sequence of follow/unfollow operations leaves the graph
// symmetric and self-edge free.
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Follow(usize, usize),
    Unfollow(usize, usize),
}

fn op_strategy(users: usize) -> impl Strategy<Value = Op> {
    (0..users, 0..users, any::<bool>()).prop_map(|(a, b, follow)| {
        if follow {
            Op::Follow(a, b)
        } else {
            Op::Unfollow(a, b)
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn random_edge_churn_preserves_symmetry(ops in proptest::collection::vec(op_strategy(4), 1..40)) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async move {
            let names = ["u0", "u1", "u2", "u3"];
            let repo = seeded_repo(&names).await;
            let follow = FollowUserHandler::new(repo.clone());
            let unfollow = UnfollowUserHandler::new(repo.clone());

            for op in ops {
                match op {
                    Op::Follow(a, b) => {
                        let result = follow
                            .handle(FollowUserCommand {
                                actor_id: uid(names[a]),
                                target_id: uid(names[b]),
                            })
                            .await;
                        if a == b {
                            assert_eq!(result.unwrap_err(), UserError::SelfReference);
                        } else {
                            result.unwrap();
                        }
                    }
                    Op::Unfollow(a, b) => {
                        let result = unfollow
                            .handle(UnfollowUserCommand {
                                actor_id: uid(names[a]),
                                target_id: uid(names[b]),
                            })
                            .await;
                        if a == b {
                            assert_eq!(result.unwrap_err(), UserError::SelfReference);
                        } else {
                            result.unwrap();
                        }
                    }
                }
            }

            assert_graph_symmetric(&repo).await;
            for user in repo.find_all().await.unwrap() {
                assert!(!user.following().contains(user.id()));
                assert!(!user.followers().contains(user.id()));
            }
        });
    }
}
