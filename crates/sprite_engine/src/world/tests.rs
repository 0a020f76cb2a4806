//! Scenario tests for the world: movement ticks, collision ticks and the
//! responses wired between them.

use super::*;
use crate::foundation::logging;
use crate::input::KeyCode;
use crate::render::{NullSurface, RecordingSurface, VisualOp};
use std::cell::RefCell;
use std::rc::Rc;

fn world() -> World {
    logging::init_for_tests();
    World::new(Box::new(NullSurface))
}

fn collision_log(world: &mut World, id: ObjectId) -> Rc<RefCell<Vec<ObjectId>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    world
        .on(id, COLLISION, move |event| {
            if let ObjectEvent::Collision(contact) = event {
                sink.borrow_mut().push(contact.other);
            }
        })
        .unwrap();
    log
}

#[test]
fn test_walk_right_five_ticks() {
    let mut world = world();
    let id = world.spawn_character(0, 0, "green");

    world.character_mut(id).unwrap().walk_right();
    world.advance(5);

    let character = world.character(id).unwrap();
    assert_eq!(character.object().position(), (5, 0));
    assert_eq!(character.direction(), Some(Direction::Right));
    assert_eq!(world.movement_ticks(), 5);
}

#[test]
fn test_stationary_character_stays_put() {
    let mut world = world();
    let id = world.spawn_character(12, -7, "green");
    world.advance(250);
    assert_eq!(world.object(id).unwrap().position(), (12, -7));
}

#[test]
fn test_walk_then_stop_keeps_position() {
    let mut world = world();
    let id = world.spawn_character(0, 0, "green");
    world.advance(3);
    let character = world.character_mut(id).unwrap();
    character.walk_right();
    character.stop();
    assert_eq!(character.direction(), None);
    assert_eq!(character.object().position(), (0, 0));
}

#[test]
fn test_overlap_notifies_both_members_once() {
    let mut world = world();
    let a = world.spawn_character(0, 0, "green");
    let b = world.spawn_character(3, 0, "red");
    let far = world.spawn_object(1000, 1000);
    let a_log = collision_log(&mut world, a);
    let b_log = collision_log(&mut world, b);
    let far_log = collision_log(&mut world, far);

    let pairs = world.detect_collisions();

    assert_eq!(pairs, vec![CollisionPair { first: a, second: b }]);
    assert_eq!(*a_log.borrow(), vec![b]);
    assert_eq!(*b_log.borrow(), vec![a]);
    assert!(far_log.borrow().is_empty());
}

#[test]
fn test_bounce_back_scenario() {
    let mut world = world();
    let a = world.spawn_moveable(0, 0, "green");
    world.character_mut(a).unwrap().walk_right();
    world.advance(5);
    let b = world.spawn_character(3, 0, "red");
    let b_log = collision_log(&mut world, b);

    world.detect_collisions();

    let player = world.character(a).unwrap();
    assert_eq!(player.object().position(), (0, 0));
    assert_eq!(player.direction(), None);
    assert_eq!(*b_log.borrow(), vec![a]);
    assert_eq!(world.object(b).unwrap().position(), (3, 0));
}

#[test]
fn test_bounce_back_from_origin() {
    let mut world = world();
    let a = world.spawn_moveable(0, 0, "green");
    world.spawn_character(3, 0, "red");
    world.character_mut(a).unwrap().walk_right();

    world.detect_collisions();

    assert_eq!(world.object(a).unwrap().position(), (-5, 0));
    assert_eq!(world.character(a).unwrap().direction(), None);
}

#[test]
fn test_moveable_ignores_plain_objects() {
    let mut world = world();
    let a = world.spawn_moveable(0, 0, "green");
    world.spawn_object(50, 0);
    world.character_mut(a).unwrap().walk_up();

    world.detect_collisions();

    assert_eq!(world.object(a).unwrap().position(), (0, 0));
    assert_eq!(world.character(a).unwrap().direction(), Some(Direction::Up));
}

#[test]
fn test_ignore_policy_still_notifies_listeners() {
    let mut world = world();
    let a = world.spawn_moveable_with_policy(0, 0, "green", CollisionPolicy::Ignore);
    let b = world.spawn_character(10, 0, "red");
    let a_log = collision_log(&mut world, a);
    world.character_mut(a).unwrap().walk_right();

    world.detect_collisions();

    assert_eq!(*a_log.borrow(), vec![b]);
    assert_eq!(world.character(a).unwrap().direction(), Some(Direction::Right));
}

#[test]
fn test_snapshot_isolates_responses_within_a_tick() {
    // c overlaps a's box at the start of the tick (0..100) but not the box a
    // bounces into (-5..95)
    let mut world = world();
    let a = world.spawn_moveable(0, 0, "green");
    let b = world.spawn_character(50, 0, "red");
    let c = world.spawn_character(97, 0, "blue");
    let c_log = collision_log(&mut world, c);
    world.character_mut(a).unwrap().walk_right();

    let pairs = world.detect_collisions();

    assert_eq!(world.object(a).unwrap().position(), (-5, 0));
    assert_eq!(
        pairs,
        vec![
            CollisionPair { first: a, second: b },
            CollisionPair { first: a, second: c },
            CollisionPair { first: b, second: c },
        ]
    );
    assert_eq!(*c_log.borrow(), vec![a, b]);
}

#[test]
fn test_far_objects_do_not_break_ticks() {
    let mut world = world();
    let far = world.spawn_object(i32::MAX - 50, 0);
    let near = world.spawn_object(i32::MAX - 120, 0);
    let origin = world.spawn_object(0, 0);
    let edge = world.spawn_character(i32::MAX, i32::MIN, "green");
    world.character_mut(edge).unwrap().walk_right();

    world.advance(3);
    let pairs = world.detect_collisions();

    assert_eq!(pairs, vec![CollisionPair { first: far, second: near }]);
    assert!(!pairs.iter().any(|pair| pair.involves(origin)));
    assert_eq!(world.object(edge).unwrap().position(), (i32::MAX, i32::MIN));
}

#[test]
fn test_disjoint_objects_never_collide() {
    let mut world = world();
    let a = world.spawn_object(0, 0);
    let b = world.spawn_object(100, 0);
    let a_log = collision_log(&mut world, a);
    let b_log = collision_log(&mut world, b);

    for _ in 0..1000 {
        assert!(world.step().is_empty());
    }

    assert!(a_log.borrow().is_empty());
    assert!(b_log.borrow().is_empty());
    assert_eq!(world.collision_ticks(), 1000);
}

#[test]
fn test_failing_listener_does_not_stop_tick() {
    let mut world = world();
    let a = world.spawn_character(0, 0, "green");
    let b = world.spawn_character(1, 0, "red");
    world
        .try_on(a, COLLISION, |_| Err(ListenerError::new("listener exploded")))
        .unwrap();
    let b_log = collision_log(&mut world, b);

    world.detect_collisions();

    assert_eq!(*b_log.borrow(), vec![a]);
}

#[test]
fn test_world_listeners_see_each_pair() {
    let mut world = world();
    let pairs = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&pairs);
    world.on_world(COLLISION, move |event| {
        if let WorldEvent::Collision(pair) = event {
            sink.borrow_mut().push(*pair);
        }
    });
    let a = world.spawn_object(0, 0);
    let b = world.spawn_object(1, 1);

    world.detect_collisions();
    world.detect_collisions();

    assert_eq!(
        *pairs.borrow(),
        vec![CollisionPair { first: a, second: b }; 2]
    );
}

#[test]
fn test_removed_object_leaves_both_ticks() {
    let surface = RecordingSurface::new();
    let mut world = World::new(Box::new(surface.clone()));
    let a = world.spawn_character(0, 0, "green");
    let b = world.spawn_character(10, 0, "red");
    let removed = Rc::new(RefCell::new(false));
    let flag = Rc::clone(&removed);
    world
        .on(b, REMOVED, move |_| *flag.borrow_mut() = true)
        .unwrap();
    world.character_mut(b).unwrap().walk_left();

    let body = world.remove(b).unwrap();
    world.advance(10);

    assert!(*removed.borrow());
    assert!(world.detect_collisions().is_empty());
    assert!(!world.contains(b));
    assert_eq!(world.ids(), &[a]);
    assert_eq!(body.object().position(), (10, 0));
    assert_eq!(surface.ops_for(b).last(), Some(&VisualOp::Detached));
    assert!(matches!(world.remove(b), Err(WorldError::UnknownObject(id)) if id == b));
    assert_eq!(
        world.on(b, COLLISION, |_| {}),
        Err(WorldError::UnknownObject(b))
    );
}

#[test]
fn test_exited_pairs_after_separation() {
    let mut world = world();
    let a = world.spawn_moveable(0, 0, "green");
    let b = world.spawn_object(99, 0);
    world.detect_collisions();
    assert_eq!(world.collisions_entered(), vec![CollisionPair { first: a, second: b }]);

    world.object_mut(b).unwrap().set_x(500);
    world.detect_collisions();

    assert_eq!(world.collisions_exited(), vec![CollisionPair { first: a, second: b }]);
    assert!(world.collisions_entered().is_empty());
}

#[test]
fn test_input_drives_every_moveable() {
    let mut world = world();
    let a = world.spawn_moveable(0, 0, "green");
    let b = world.spawn_moveable(0, 500, "red");
    let statue = world.spawn_character(0, 1000, "grey");

    world.dispatch_input(InputEvent::KeyDown(KeyCode::Right));
    world.dispatch_input(InputEvent::KeyDown(KeyCode::Up));
    world.advance(2);

    assert_eq!(world.object(a).unwrap().position(), (2, 0));
    assert_eq!(world.object(b).unwrap().position(), (2, 500));
    assert_eq!(world.character(statue).unwrap().direction(), None);

    world.dispatch_input(InputEvent::KeyUp(KeyCode::Space));
    world.advance(2);
    assert_eq!(world.object(a).unwrap().position(), (2, 0));
}

#[test]
fn test_spawn_pushes_visual_state() {
    let surface = RecordingSurface::new();
    let mut world = World::new(Box::new(surface.clone()));
    let id = world.spawn_moveable(7, 8, "green");

    world.dispatch_input(InputEvent::KeyDown(KeyCode::Left));
    world.advance(1);

    assert_eq!(
        surface.ops_for(id),
        vec![
            VisualOp::Created,
            VisualOp::Position(7, 8),
            VisualOp::Size(100, 150),
            VisualOp::Source("assets/green/static.gif".to_string()),
            VisualOp::Source("assets/green/walkleft.gif".to_string()),
            VisualOp::Position(6, 8),
        ]
    );
}

#[test]
fn test_invalid_size_rejected_at_spawn() {
    let mut world = world();
    assert_eq!(
        world.spawn_sized(0, 0, 0, 10),
        Err(WorldError::InvalidGeometry { width: 0, height: 10 })
    );
    assert!(world.is_empty());
    let id = world.spawn_sized(0, 0, 10, 10).unwrap();
    assert_eq!(world.object(id).unwrap().right_side(), 10);
}

#[test]
fn test_spawn_and_remove_events() {
    let mut world = world();
    let events = Rc::new(RefCell::new(Vec::new()));
    for name in [SPAWNED, REMOVED] {
        let sink = Rc::clone(&events);
        world.on_world(name, move |event| sink.borrow_mut().push(*event));
    }

    let id = world.spawn_object(0, 0);
    world.clear();

    assert_eq!(
        *events.borrow(),
        vec![WorldEvent::Spawned(id), WorldEvent::Removed(id)]
    );
    assert!(world.is_empty());
}
