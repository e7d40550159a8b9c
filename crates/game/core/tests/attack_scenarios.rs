//! End-to-end basic attack scenarios against the reference world.

use tactics_core::{
    Action, ActionDefinition, ActionRegistry, CombatConfig, CombatStats, DamageKind, DefenderCue,
    EntityId, EntityState, EventGroup, InputEvent, InputKey, MaintenanceStatus, Position, SideId,
    Sprite, WorldState, find_targets,
};

const GHOUL: EntityId = EntityId(1);
const EXPLORER: EntityId = EntityId(2);

fn registry() -> ActionRegistry {
    ActionRegistry::from_definitions([
        ActionDefinition::new("Claw")
            .with_ap_cost(2)
            .with_ammo(1)
            .with_strength(5)
            .with_range(1)
            .with_damage(4, DamageKind::Physical)
            .with_animation("melee")
            .with_condition("bleeding"),
        ActionDefinition::new("Bite")
            .with_ap_cost(1)
            .with_strength(5)
            .with_range(1)
            .with_damage(1, DamageKind::Poison)
            .with_animation("bite"),
    ])
    .unwrap()
}

fn arena(explorer_hp: i32, explorer_defense: i32) -> WorldState {
    let mut world = WorldState::new(0x5eed, CombatConfig::default());
    world
        .spawn(
            EntityState::new(GHOUL, Position::new(3, 3), SideId::HAUNT)
                .with_name("ghoul")
                .with_stats(CombatStats::new(4, 8, 0)),
        )
        .unwrap();
    world
        .spawn(
            EntityState::new(EXPLORER, Position::new(4, 4), SideId::EXPLORERS)
                .with_name("explorer")
                .with_stats(CombatStats::new(4, 10, explorer_defense)),
        )
        .unwrap();
    world.get_mut(EXPLORER).unwrap().stats.as_mut().unwrap().hp.current = explorer_hp;
    world
}

fn click() -> EventGroup {
    EventGroup::new().with(InputEvent::press(InputKey::PrimarySelect))
}

fn ap(world: &WorldState, id: EntityId) -> i32 {
    world.get(id).unwrap().stats.as_ref().unwrap().ap.current
}

fn hp(world: &WorldState, id: EntityId) -> i32 {
    world.get(id).unwrap().stats.as_ref().unwrap().hp.current
}

/// Drives `maintain` until the attack completes, settling animations between ticks.
fn resolve(
    attack: &mut impl Action,
    world: &mut WorldState,
    record: &tactics_core::ExecutionRecord,
) -> usize {
    let mut ticks = 1;
    let mut status = attack.maintain(1, world, Some(record));
    while status == MaintenanceStatus::InProgress {
        world.advance_animations();
        status = attack.maintain(1, world, None);
        ticks += 1;
        assert!(ticks < 100, "attack never completed");
    }
    ticks
}

#[test]
fn guaranteed_hit_damages_target() {
    let registry = registry();
    let mut world = arena(10, 0);
    let mut claw = registry.make("Claw").unwrap();

    assert!(claw.prep(GHOUL, &mut world));
    world.set_hovered(Some(EXPLORER));
    let (consumed, record) = claw.handle_input(&click(), &world);
    assert!(consumed);
    let record = record.unwrap();

    resolve(&mut claw, &mut world, &record);

    let report = claw.last_report().unwrap();
    assert!(report.hit);
    assert_eq!(report.cue, DefenderCue::Damaged);
    assert_eq!(ap(&world, GHOUL), 2);
    assert_eq!(claw.current_ammo(), 0);
    assert_eq!(hp(&world, EXPLORER), 6);

    let explorer = world.get(EXPLORER).unwrap();
    assert!(explorer.stats.as_ref().unwrap().has_condition("bleeding"));
    assert_eq!(explorer.info.last_entity_that_attacked_me, Some(GHOUL));
    assert_eq!(world.get(GHOUL).unwrap().info.last_entity_i_attacked, Some(EXPLORER));
}

#[test]
fn lethal_hit_reports_killed() {
    let registry = registry();
    let mut world = arena(3, 0);
    let mut claw = registry.make("Claw").unwrap();
    let record = claw.ai_select(GHOUL, EXPLORER, &world).unwrap();

    resolve(&mut claw, &mut world, &record);

    assert_eq!(claw.last_report().unwrap().cue, DefenderCue::Killed);
    assert!(hp(&world, EXPLORER) <= 0);
    assert!(find_targets(GHOUL, 1, &world).is_empty());
}

#[test]
fn miss_still_costs_ap_and_ammo() {
    let registry = registry();
    let mut world = arena(10, 20);
    let mut claw = registry.make("Claw").unwrap();
    let record = claw.ai_select(GHOUL, EXPLORER, &world).unwrap();

    resolve(&mut claw, &mut world, &record);

    let report = claw.last_report().unwrap();
    assert!(!report.hit);
    assert_eq!(report.cue, DefenderCue::Undamaged);
    assert_eq!(hp(&world, EXPLORER), 10);
    assert_eq!(ap(&world, GHOUL), 2);
    assert_eq!(claw.current_ammo(), 0);
    assert!(!world.get(EXPLORER).unwrap().stats.as_ref().unwrap().has_condition("bleeding"));
}

#[test]
fn repeated_maintain_while_waiting_mutates_once() {
    let registry = registry();
    let mut world = arena(10, 0);
    let mut claw = registry.make("Claw").unwrap();
    let record = claw.ai_select(GHOUL, EXPLORER, &world).unwrap();

    world.get_mut(EXPLORER).unwrap().sprite_state_mut().play("dodge");
    let before = world.clone();

    assert_eq!(claw.maintain(1, &mut world, Some(&record)), MaintenanceStatus::InProgress);
    assert_eq!(claw.maintain(1, &mut world, Some(&record)), MaintenanceStatus::InProgress);
    assert_eq!(world, before);

    world.advance_animations();
    world.advance_animations();
    assert_eq!(claw.maintain(1, &mut world, Some(&record)), MaintenanceStatus::Complete);
    let after = world.clone();

    assert_eq!(claw.maintain(1, &mut world, Some(&record)), MaintenanceStatus::Complete);
    assert_eq!(claw.maintain(1, &mut world, None), MaintenanceStatus::Complete);
    assert_eq!(world, after);
    assert_eq!(hp(&world, EXPLORER), 6);
}

#[test]
fn unlimited_ammo_is_never_spent() {
    let registry = registry();
    let mut world = arena(10, 0);
    let mut bite = registry.make("Bite").unwrap();
    assert_eq!(bite.current_ammo(), -1);

    for expected_hp in [9, 8, 7] {
        let record = bite.ai_select(GHOUL, EXPLORER, &world).unwrap();
        resolve(&mut bite, &mut world, &record);
        while !world.animations_settled() {
            world.advance_animations();
        }
        assert_eq!(hp(&world, EXPLORER), expected_hp);
        assert_eq!(bite.current_ammo(), -1);
    }
    assert_eq!(ap(&world, GHOUL), 1);
}

#[test]
fn second_ai_record_resolves_without_cancel() {
    let registry = registry();
    let mut world = arena(10, 0);
    let mut bite = registry.make("Bite").unwrap();

    let first = bite.ai_select(GHOUL, EXPLORER, &world).unwrap();
    resolve(&mut bite, &mut world, &first);
    assert_eq!(bite.last_report().unwrap().target_hp, 9);

    let second = bite.ai_select(GHOUL, EXPLORER, &world).unwrap();
    assert_eq!(second, first);
    assert!(bite.last_report().is_none());

    resolve(&mut bite, &mut world, &second);
    assert_eq!(hp(&world, EXPLORER), 8);
    assert_eq!(ap(&world, GHOUL), 2);
    assert_eq!(bite.last_report().unwrap().target_hp, 8);
}

#[test]
fn preppable_requires_ammo_ap_and_targets() {
    let registry = registry();
    let mut world = arena(10, 0);
    let mut claw = registry.make("Claw").unwrap();
    assert!(claw.preppable(GHOUL, &world));

    // No AP.
    world.get_mut(GHOUL).unwrap().stats.as_mut().unwrap().ap.current = 1;
    assert!(!claw.preppable(GHOUL, &world));
    world.get_mut(GHOUL).unwrap().stats.as_mut().unwrap().refresh_ap();

    // No targets in range.
    world.move_entity(EXPLORER, Position::new(6, 6)).unwrap();
    assert!(!claw.preppable(GHOUL, &world));
    world.move_entity(EXPLORER, Position::new(4, 4)).unwrap();

    // No ammo.
    let record = claw.ai_select(GHOUL, EXPLORER, &world).unwrap();
    resolve(&mut claw, &mut world, &record);
    claw.cancel();
    world.get_mut(GHOUL).unwrap().stats.as_mut().unwrap().refresh_ap();
    assert!(!claw.preppable(GHOUL, &world));
    assert!(!claw.prep(GHOUL, &mut world));
    assert!(claw.ai_select(GHOUL, EXPLORER, &world).is_none());
}

#[test]
fn stale_record_for_dead_target_is_dropped() {
    let registry = registry();
    let mut world = arena(10, 0);
    let mut claw = registry.make("Claw").unwrap();
    let record = claw.ai_select(GHOUL, EXPLORER, &world).unwrap();

    world.get_mut(EXPLORER).unwrap().stats.as_mut().unwrap().hp.current = 0;
    let before = world.clone();

    assert_eq!(claw.maintain(1, &mut world, Some(&record)), MaintenanceStatus::Complete);
    assert_eq!(world, before);
    assert_eq!(claw.current_ammo(), 1);
    assert!(claw.last_report().is_none());
}

#[test]
fn record_from_drained_actor_is_dropped() {
    let registry = registry();
    let mut world = arena(10, 0);
    let mut claw = registry.make("Claw").unwrap();
    let record = claw.ai_select(GHOUL, EXPLORER, &world).unwrap();

    world.get_mut(GHOUL).unwrap().stats.as_mut().unwrap().ap.current = 1;
    let before = world.clone();

    assert_eq!(claw.maintain(1, &mut world, Some(&record)), MaintenanceStatus::Complete);
    assert_eq!(world, before);
    assert_eq!(claw.current_ammo(), 1);
    assert!(claw.last_report().is_none());
}

#[test]
fn record_for_target_out_of_range_is_dropped() {
    let registry = registry();
    let mut world = arena(10, 0);
    let mut claw = registry.make("Claw").unwrap();
    let record = claw.ai_select(GHOUL, EXPLORER, &world).unwrap();

    world.move_entity(EXPLORER, Position::new(6, 6)).unwrap();
    let before = world.clone();

    assert_eq!(claw.maintain(1, &mut world, Some(&record)), MaintenanceStatus::Complete);
    assert_eq!(world, before);
    assert_eq!(claw.current_ammo(), 1);
    assert_eq!(hp(&world, EXPLORER), 10);
    assert!(claw.last_report().is_none());
}

#[test]
fn targeting_follows_chebyshev_distance() {
    let mut world = arena(10, 0);
    for (id, x, y) in [(10, 5, 5), (11, 5, 1), (12, 0, 3), (13, 6, 3)] {
        world
            .spawn(
                EntityState::new(EntityId(id), Position::new(x, y), SideId::EXPLORERS)
                    .with_stats(CombatStats::new(4, 10, 0)),
            )
            .unwrap();
    }

    let within_two = find_targets(GHOUL, 2, &world);
    assert_eq!(within_two, vec![EXPLORER, EntityId(10), EntityId(11)]);

    let within_three = find_targets(GHOUL, 3, &world);
    assert_eq!(within_three.len(), 5);
    assert!(!within_three.contains(&GHOUL));
}
