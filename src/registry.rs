/// Entity registry, the sole owner of every live entity.
///
/// Storage is a slot arena addressed by generational `EntityId`s; the slots
/// are threaded into a doubly-linked list (`prev`/`next` indices) so that
/// iteration order is insertion order and removal by id is O(1). Ids of
/// removed entities go stale: a later lookup returns `None` rather than
/// aliasing whatever reuses the slot.

use crate::entities::Entity;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntityId {
    index: u32,
    generation: u32,
}

#[derive(Debug)]
struct Node {
    entity: Entity,
    prev: Option<u32>,
    next: Option<u32>,
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

#[derive(Debug, Default)]
pub struct Registry {
    slots: Vec<Slot>,
    free: Vec<u32>,
    head: Option<u32>,
    tail: Option<u32>,
    len: usize,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append `entity` at the tail and return its id.
    pub fn add(&mut self, entity: Entity) -> EntityId {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot::default());
                (self.slots.len() - 1) as u32
            }
        };

        let slot = &mut self.slots[index as usize];
        slot.node = Some(Node {
            entity,
            prev: self.tail,
            next: None,
        });
        let id = EntityId {
            index,
            generation: slot.generation,
        };

        match self.tail {
            Some(tail) => {
                if let Some(node) = self.slots[tail as usize].node.as_mut() {
                    node.next = Some(index);
                }
            }
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.len += 1;
        id
    }

    /// Unlink and return the entity. `None` means the id is not (or no
    /// longer) in the registry.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);

        match node.prev {
            Some(prev) => {
                if let Some(p) = self.slots[prev as usize].node.as_mut() {
                    p.next = node.next;
                }
            }
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => {
                if let Some(n) = self.slots[next as usize].node.as_mut() {
                    n.prev = node.prev;
                }
            }
            None => self.tail = node.prev,
        }

        self.len -= 1;
        Some(node.entity)
    }

    /// Drop every entity (new-game reset and teardown).
    pub fn destroy_all(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index as u32);
            }
        }
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_ref().map(|n| &n.entity)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_mut().map(|n| &mut n.entity)
    }

    pub fn head(&self) -> Option<EntityId> {
        self.head.map(|i| self.id_at(i))
    }

    pub fn tail(&self) -> Option<EntityId> {
        self.tail.map(|i| self.id_at(i))
    }

    pub fn next_of(&self, id: EntityId) -> Option<EntityId> {
        self.node(id)?.next.map(|i| self.id_at(i))
    }

    pub fn prev_of(&self, id: EntityId) -> Option<EntityId> {
        self.node(id)?.prev.map(|i| self.id_at(i))
    }

    /// Snapshot of ids in list order; entities added afterwards are not in it.
    pub fn ids(&self) -> Vec<EntityId> {
        self.iter().map(|(id, _)| id).collect()
    }

    /// Forward traversal from head.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            registry: self,
            cursor: self.head,
            forward: true,
        }
    }

    /// Backward traversal from tail.
    pub fn iter_rev(&self) -> Iter<'_> {
        Iter {
            registry: self,
            cursor: self.tail,
            forward: false,
        }
    }

    /// First entity that is the player's ship.
    pub fn find_player(&self) -> Option<EntityId> {
        self.iter()
            .find(|(_, e)| e.is_player_ship())
            .map(|(id, _)| id)
    }

    fn node(&self, id: EntityId) -> Option<&Node> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_ref()
    }

    fn id_at(&self, index: u32) -> EntityId {
        EntityId {
            index,
            generation: self.slots[index as usize].generation,
        }
    }
}

pub struct Iter<'a> {
    registry: &'a Registry,
    cursor: Option<u32>,
    forward: bool,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (EntityId, &'a Entity);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        let slot = &self.registry.slots[index as usize];
        let node = slot.node.as_ref()?;
        self.cursor = if self.forward { node.next } else { node.prev };
        Some((
            EntityId {
                index,
                generation: slot.generation,
            },
            &node.entity,
        ))
    }
}
