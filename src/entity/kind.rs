//! Entity kinds and the single data table describing them
//!
//! Every per-kind fact (texture, display name, starting health, category,
//! what it drops) lives in [`KIND_TABLE`]; nothing else switches on kind.

/// Type tag of an entity slot. `Nil` marks an empty slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EntityKind {
    #[default]
    Nil = 0,
    Rock = 1,
    Tree = 2,
    Player = 3,
    ItemRock = 4,
    ItemPinewood = 5,
    BuildingFurnace = 6,
    BuildingWorkbench = 7,
}

/// Broad grouping used to route lookups into category tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    None,
    /// Harvestable world objects
    Resource,
    Actor,
    /// Dropped items, picked up on contact
    Item,
    Building,
}

#[derive(Debug, Clone, Copy)]
pub struct KindInfo {
    pub texture_key: Option<&'static str>,
    pub display_name: &'static str,
    /// Health on spawn; zero means clicks never damage it
    pub default_health: u32,
    pub category: Category,
    /// Item entity spawned in place when destroyed
    pub drop: Option<EntityKind>,
}

const fn info(
    texture_key: Option<&'static str>,
    display_name: &'static str,
    default_health: u32,
    category: Category,
    drop: Option<EntityKind>,
) -> KindInfo {
    KindInfo {
        texture_key,
        display_name,
        default_health,
        category,
        drop,
    }
}

/// Indexed by `EntityKind as usize`
pub static KIND_TABLE: [KindInfo; EntityKind::COUNT] = [
    info(None, "Default", 0, Category::None, None),
    info(Some("assets/rock.png"), "Rock", 3, Category::Resource, Some(EntityKind::ItemRock)),
    info(Some("assets/tree.png"), "Tree", 3, Category::Resource, Some(EntityKind::ItemPinewood)),
    info(Some("assets/player.png"), "Player", 0, Category::Actor, None),
    info(Some("assets/item-rock.png"), "Rock", 0, Category::Item, None),
    info(Some("assets/item-pinewood.png"), "Pinewood", 0, Category::Item, None),
    info(Some("assets/building-furnace.png"), "Furnace", 0, Category::Building, None),
    info(Some("assets/building-workbench.png"), "Workbench", 0, Category::Building, None),
];

pub const ITEM_FIRST: EntityKind = EntityKind::ItemRock;
pub const ITEM_LAST: EntityKind = EntityKind::ItemPinewood;
pub const ITEM_COUNT: usize = ITEM_LAST as usize - ITEM_FIRST as usize + 1;

pub const BUILDING_FIRST: EntityKind = EntityKind::BuildingFurnace;
pub const BUILDING_LAST: EntityKind = EntityKind::BuildingWorkbench;
pub const BUILDING_COUNT: usize = BUILDING_LAST as usize - BUILDING_FIRST as usize + 1;

impl EntityKind {
    pub const COUNT: usize = 8;

    pub const ALL: [EntityKind; Self::COUNT] = [
        EntityKind::Nil,
        EntityKind::Rock,
        EntityKind::Tree,
        EntityKind::Player,
        EntityKind::ItemRock,
        EntityKind::ItemPinewood,
        EntityKind::BuildingFurnace,
        EntityKind::BuildingWorkbench,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn info(self) -> &'static KindInfo {
        &KIND_TABLE[self as usize]
    }

    pub fn display_name(self) -> &'static str {
        self.info().display_name
    }

    pub fn category(self) -> Category {
        self.info().category
    }

    pub fn is_item(self) -> bool {
        self.category() == Category::Item
    }

    pub fn is_building(self) -> bool {
        self.category() == Category::Building
    }

    /// Offset into item-category tables, if this is an item
    pub fn item_slot(self) -> Option<usize> {
        let (first, last) = (ITEM_FIRST as usize, ITEM_LAST as usize);
        let k = self as usize;
        (first..=last).contains(&k).then(|| k - first)
    }

    /// Offset into building-category tables, if this is a building
    pub fn building_slot(self) -> Option<usize> {
        let (first, last) = (BUILDING_FIRST as usize, BUILDING_LAST as usize);
        let k = self as usize;
        (first..=last).contains(&k).then(|| k - first)
    }

    pub fn items() -> impl Iterator<Item = EntityKind> {
        (ITEM_FIRST as usize..=ITEM_LAST as usize).filter_map(Self::from_index)
    }

    pub fn buildings() -> impl Iterator<Item = EntityKind> {
        (BUILDING_FIRST as usize..=BUILDING_LAST as usize).filter_map(Self::from_index)
    }
}

/// Lookup by raw tag, falling back to the `Nil` entry for unknown values
pub fn info_for_index(index: usize) -> &'static KindInfo {
    match EntityKind::from_index(index) {
        Some(kind) => kind.info(),
        None => {
            tracing::warn!("Unknown entity kind {}, using default entry", index);
            EntityKind::Nil.info()
        }
    }
}
