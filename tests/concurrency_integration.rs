//! Concurrent use of the pure resolution and check functions

use rankperms::{check_patch_changes, has_permission, resolve, Permission, PermissionProfile, PositionGrant};
use std::sync::Arc;
use std::thread;
use tokio::task::JoinSet;

fn profile_for(i: usize) -> PermissionProfile {
    PermissionProfile::new(
        vec![
            PositionGrant::new("base", 1, Permission::from_list(["rpc.Claim", "apps.view"])),
            PositionGrant::new(
                format!("lead_{}", i),
                2,
                Permission::from_list(["rpc.*".to_string(), format!("~rpc.Action{}", i)]),
            ),
        ],
        Permission::from_list([format!("team{}.manage", i)]),
    )
}

#[test]
fn test_concurrent_threads_share_profile() {
    let profile = Arc::new(profile_for(0));
    let expected = resolve(&profile);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let profile = Arc::clone(&profile);
            thread::spawn(move || resolve(&profile))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_tasks() {
    let mut set = JoinSet::new();

    for i in 0..32 {
        set.spawn_blocking(move || {
            let resolved = resolve(&profile_for(i));
            let own_team = Permission::parse(&format!("team{}.manage", i));
            let other_team = Permission::parse(&format!("team{}.manage", i + 1));

            assert!(has_permission(&resolved, &own_team));
            assert!(!has_permission(&resolved, &other_team));
            assert!(!has_permission(&resolved, &Permission::parse(&format!("rpc.Action{}", i))));

            let current = Permission::from_list(["rpc.Claim"]);
            let proposed = Permission::from_list(["rpc.Claim", "apps.view"]);
            check_patch_changes(&resolved, &current, &proposed).is_ok()
        });
    }

    let mut completed = 0;
    while let Some(result) = set.join_next().await {
        assert!(result.unwrap());
        completed += 1;
    }

    assert_eq!(completed, 32);
}

#[test]
fn test_public_types_are_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<Permission>();
    assert_send_sync::<PositionGrant>();
    assert_send_sync::<PermissionProfile>();
    assert_send_sync::<rankperms::AuthzError>();
    assert_send_sync::<rankperms::ResolveEvent>();
    assert_send_sync::<rankperms::RecordingSink>();
}
