//! Per-frame hitbox index and nearest-under-cursor resolution
//!
//! The index is rebuilt from scratch every frame: one rectangle per active
//! entity, pushed in slot order. A single pass over it then finds the
//! hovered entity and performs item pickups. Records are never kept across
//! frames; the backing vector is cleared, not reallocated.

use glam::Vec2;

use crate::city::inventory::Inventory;
use crate::core::types::{sin_in_out, Rect, TileSpace};
use crate::entity::kind::EntityKind;
use crate::entity::pool::{Entity, EntityHandle, EntityPool};

/// Parameters for turning an entity into its world-space sprite rectangle
#[derive(Debug, Clone, Copy)]
pub struct SpriteMetrics {
    pub space: TileSpace,
    pub scale: f32,
    pub bob_amplitude: f32,
    pub time: f32,
}

/// World-space rectangle an entity's sprite covers this frame
pub fn entity_rect(entity: &Entity, texture_size: Vec2, metrics: &SpriteMetrics) -> Rect {
    let mut world = metrics.space.to_world(entity.pos);
    if entity.kind == EntityKind::ItemPinewood {
        world.y += metrics.scale * metrics.bob_amplitude * sin_in_out(metrics.time);
    }
    Rect::from_pos_size(world, texture_size * metrics.scale)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub rect: Rect,
    pub entity: EntityHandle,
    pub kind: EntityKind,
    pub is_item: bool,
}

/// The entity under the cursor this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hovered {
    pub entity: EntityHandle,
    pub kind: EntityKind,
    pub centre: Vec2,
    pub radius: f32,
    pub distance_sq: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct ProximityQuery {
    pub cursor_world: Vec2,
    /// Centre of the player's hitbox; no pickups without one
    pub player_centre: Option<Vec2>,
    pub pickup_radius: f32,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Resolution {
    pub hovered: Option<Hovered>,
    /// Kinds of the items picked up, in pickup order
    pub picked_up: Vec<EntityKind>,
}

#[derive(Debug, Default)]
pub struct HitboxIndex {
    hitboxes: Vec<Hitbox>,
}

impl HitboxIndex {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            hitboxes: Vec::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.hitboxes.clear();
    }

    pub fn push(&mut self, hitbox: Hitbox) {
        self.hitboxes.push(hitbox);
    }

    pub fn len(&self) -> usize {
        self.hitboxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hitboxes.is_empty()
    }

    /// Hitboxes in push order
    pub fn iter(&self) -> impl Iterator<Item = &Hitbox> + '_ {
        self.hitboxes.iter()
    }

    pub fn find(&self, entity: EntityHandle) -> Option<&Hitbox> {
        self.hitboxes.iter().find(|h| h.entity == entity)
    }

    /// Resolve hover and pickups in one pass.
    ///
    /// Hover: among non-item hitboxes whose circumscribed circle contains
    /// the cursor, the one with the nearest centre. The walk runs from the
    /// most recently pushed record and only a strictly closer candidate
    /// replaces the current one, so ties go to the later push.
    ///
    /// Pickup: every item whose centre lies strictly inside
    /// `pickup_radius` of the player is freed and counted into `inventory`.
    /// Entities that no longer resolve in the pool are skipped, including
    /// those freed earlier in this same pass.
    pub fn resolve(
        &self,
        query: &ProximityQuery,
        entities: &mut EntityPool,
        inventory: &mut Inventory,
    ) -> Resolution {
        let mut resolution = Resolution::default();
        let mut closest = f32::INFINITY;
        let pickup_sq = query.pickup_radius * query.pickup_radius;

        for hitbox in self.hitboxes.iter().rev() {
            if !entities.contains(hitbox.entity) {
                continue;
            }

            let centre = hitbox.rect.centre();
            if !hitbox.is_item {
                let radius = hitbox.rect.circumscribed_radius();
                let distance_sq = centre.distance_squared(query.cursor_world);
                if distance_sq < closest && distance_sq <= radius * radius {
                    closest = distance_sq;
                    resolution.hovered = Some(Hovered {
                        entity: hitbox.entity,
                        kind: hitbox.kind,
                        centre,
                        radius,
                        distance_sq,
                    });
                }
                continue;
            }

            let Some(player) = query.player_centre else {
                continue;
            };
            if centre.distance_squared(player) < pickup_sq {
                if let Ok(item) = entities.free(hitbox.entity) {
                    inventory.add(item.kind, 1);
                    resolution.picked_up.push(item.kind);
                    tracing::debug!("Picked up {:?} from slot {}", item.kind, hitbox.entity.index());
                }
            }
        }

        resolution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::spawn;
    use proptest::prelude::*;

    fn push_entity(index: &mut HitboxIndex, pool: &EntityPool, handle: EntityHandle, rect: Rect) {
        let e = pool.get(handle).unwrap();
        index.push(Hitbox {
            rect,
            entity: handle,
            kind: e.kind,
            is_item: e.is_item,
        });
    }

    fn query(cursor: Vec2) -> ProximityQuery {
        ProximityQuery {
            cursor_world: cursor,
            player_centre: None,
            pickup_radius: 40.0,
        }
    }

    #[test]
    fn test_entity_rect_scales_texture() {
        let mut pool = EntityPool::new(1);
        let h = spawn::tree(&mut pool, Vec2::new(5.0, 5.0)).unwrap();
        let metrics = SpriteMetrics {
            space: TileSpace::new(120.0, 1.0),
            scale: 8.0,
            bob_amplitude: 5.0,
            time: 0.5,
        };
        let rect = entity_rect(pool.get(h).unwrap(), Vec2::new(16.0, 16.0), &metrics);
        assert_eq!(rect, Rect::new(600.0, 600.0, 128.0, 128.0));
    }

    #[test]
    fn test_item_rect_bobs() {
        let mut pool = EntityPool::new(1);
        let h = spawn::item_pinewood(&mut pool, Vec2::ZERO).unwrap();
        let metrics = SpriteMetrics {
            space: TileSpace::new(120.0, 1.0),
            scale: 8.0,
            bob_amplitude: 5.0,
            time: 1.0,
        };
        let rect = entity_rect(pool.get(h).unwrap(), Vec2::new(16.0, 16.0), &metrics);
        assert!((rect.y - 40.0).abs() < 1e-4);
    }

    #[test]
    fn test_rock_item_stays_still() {
        let mut pool = EntityPool::new(1);
        let h = spawn::spawn(&mut pool, EntityKind::ItemRock, Vec2::ZERO).unwrap();
        let metrics = SpriteMetrics {
            space: TileSpace::new(120.0, 1.0),
            scale: 8.0,
            bob_amplitude: 5.0,
            time: 1.0,
        };
        let rect = entity_rect(pool.get(h).unwrap(), Vec2::new(16.0, 16.0), &metrics);
        assert_eq!(rect.y, 0.0);
    }

    #[test]
    fn test_hover_picks_nearest_centre() {
        let mut pool = EntityPool::new(4);
        let mut index = HitboxIndex::default();
        let a = spawn::rock(&mut pool, Vec2::ZERO).unwrap();
        let b = spawn::tree(&mut pool, Vec2::ZERO).unwrap();
        push_entity(&mut index, &pool, a, Rect::new(0.0, 0.0, 100.0, 100.0));
        push_entity(&mut index, &pool, b, Rect::new(60.0, 0.0, 100.0, 100.0));

        let mut inventory = Inventory::new();
        let res = index.resolve(&query(Vec2::new(55.0, 50.0)), &mut pool, &mut inventory);
        assert_eq!(res.hovered.map(|h| h.entity), Some(a));

        let res = index.resolve(&query(Vec2::new(100.0, 50.0)), &mut pool, &mut inventory);
        assert_eq!(res.hovered.map(|h| h.entity), Some(b));
    }

    #[test]
    fn test_hover_uses_circumscribed_circle() {
        let mut pool = EntityPool::new(1);
        let mut index = HitboxIndex::default();
        let a = spawn::rock(&mut pool, Vec2::ZERO).unwrap();
        push_entity(&mut index, &pool, a, Rect::new(0.0, 0.0, 100.0, 20.0));
        let mut inventory = Inventory::new();

        // Outside the rect but within 50 of the centre (50, 10)
        let res = index.resolve(&query(Vec2::new(50.0, 55.0)), &mut pool, &mut inventory);
        assert_eq!(res.hovered.map(|h| h.entity), Some(a));
        assert_eq!(res.hovered.unwrap().radius, 50.0);

        let res = index.resolve(&query(Vec2::new(50.0, 61.0)), &mut pool, &mut inventory);
        assert!(res.hovered.is_none());
    }

    #[test]
    fn test_tie_goes_to_last_pushed() {
        let mut pool = EntityPool::new(2);
        let mut index = HitboxIndex::default();
        let first = spawn::rock(&mut pool, Vec2::ZERO).unwrap();
        let second = spawn::tree(&mut pool, Vec2::ZERO).unwrap();
        let rect = Rect::new(0.0, 0.0, 64.0, 64.0);
        push_entity(&mut index, &pool, first, rect);
        push_entity(&mut index, &pool, second, rect);

        let mut inventory = Inventory::new();
        let res = index.resolve(&query(Vec2::new(32.0, 32.0)), &mut pool, &mut inventory);
        assert_eq!(res.hovered.map(|h| h.entity), Some(second));
    }

    #[test]
    fn test_items_never_hovered_and_picked_up_near_player() {
        let mut pool = EntityPool::new(4);
        let mut index = HitboxIndex::default();
        let near = spawn::item_pinewood(&mut pool, Vec2::ZERO).unwrap();
        let far = spawn::item_pinewood(&mut pool, Vec2::ZERO).unwrap();
        push_entity(&mut index, &pool, near, Rect::new(0.0, 0.0, 20.0, 20.0));
        push_entity(&mut index, &pool, far, Rect::new(500.0, 0.0, 20.0, 20.0));

        let mut inventory = Inventory::new();
        let q = ProximityQuery {
            cursor_world: Vec2::new(10.0, 10.0),
            player_centre: Some(Vec2::new(15.0, 15.0)),
            pickup_radius: 40.0,
        };
        let res = index.resolve(&q, &mut pool, &mut inventory);
        assert!(res.hovered.is_none());
        assert_eq!(res.picked_up, vec![EntityKind::ItemPinewood]);
        assert_eq!(inventory.get(EntityKind::ItemPinewood), 1);
        assert!(!pool.contains(near));
        assert!(pool.contains(far));

        // A second pass over the same index skips the freed item
        let res = index.resolve(&q, &mut pool, &mut inventory);
        assert!(res.picked_up.is_empty());
        assert_eq!(inventory.get(EntityKind::ItemPinewood), 1);
    }

    #[test]
    fn test_no_pickup_without_player() {
        let mut pool = EntityPool::new(1);
        let mut index = HitboxIndex::default();
        let item = spawn::item_pinewood(&mut pool, Vec2::ZERO).unwrap();
        push_entity(&mut index, &pool, item, Rect::new(0.0, 0.0, 20.0, 20.0));
        let mut inventory = Inventory::new();
        let res = index.resolve(&query(Vec2::ZERO), &mut pool, &mut inventory);
        assert!(res.picked_up.is_empty());
        assert!(pool.contains(item));
    }

    #[test]
    fn test_stale_hitbox_skipped() {
        let mut pool = EntityPool::new(1);
        let mut index = HitboxIndex::default();
        let rock = spawn::rock(&mut pool, Vec2::ZERO).unwrap();
        push_entity(&mut index, &pool, rock, Rect::new(0.0, 0.0, 64.0, 64.0));
        pool.free(rock).unwrap();
        spawn::tree(&mut pool, Vec2::ZERO).unwrap();

        let mut inventory = Inventory::new();
        let res = index.resolve(&query(Vec2::new(32.0, 32.0)), &mut pool, &mut inventory);
        assert!(res.hovered.is_none());
    }

    /// Nearest centre within radius; ties go to the highest push index
    fn brute_force(rects: &[Rect], cursor: Vec2) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (i, r) in rects.iter().enumerate() {
            let d = r.centre().distance_squared(cursor);
            let radius = r.circumscribed_radius();
            if d > radius * radius {
                continue;
            }
            match best {
                Some((_, bd)) if d > bd => {}
                _ => best = Some((i, d)),
            }
        }
        best.map(|(i, _)| i)
    }

    fn arb_rect() -> impl Strategy<Value = Rect> {
        (0i32..20, 0i32..20, 1i32..8, 1i32..8).prop_map(|(x, y, w, h)| {
            Rect::new(x as f32 * 8.0, y as f32 * 8.0, w as f32 * 8.0, h as f32 * 8.0)
        })
    }

    proptest! {
        #[test]
        fn hover_is_deterministic_and_nearest(
            rects in proptest::collection::vec(arb_rect(), 1..40),
            cx in 0i32..200,
            cy in 0i32..200,
        ) {
            let mut pool = EntityPool::new(64);
            let mut index = HitboxIndex::default();
            let mut handles = Vec::new();
            for r in &rects {
                let h = spawn::rock(&mut pool, Vec2::ZERO).unwrap();
                push_entity(&mut index, &pool, h, *r);
                handles.push(h);
            }
            let cursor = Vec2::new(cx as f32, cy as f32);
            let mut inventory = Inventory::new();

            let first = index.resolve(&query(cursor), &mut pool, &mut inventory);
            let second = index.resolve(&query(cursor), &mut pool, &mut inventory);
            prop_assert_eq!(&first, &second);

            let expected = brute_force(&rects, cursor).map(|i| handles[i]);
            prop_assert_eq!(first.hovered.map(|h| h.entity), expected);
        }
    }
}
