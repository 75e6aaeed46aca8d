use super::{
    broad::{self, WorldAccel},
    narrow_phase,
    settings::BROAD_PHASE_MARGIN,
    types::{Capsule, Contact, Vec3, Volume},
};

/// Immutable index over a level's static volumes.
///
/// Built once at level-build time from the submitted volumes; there is no incremental
/// insertion. Rebuild to change the geometry. Read-only after construction, so any
/// number of solvers may query it through shared references.
pub struct CollisionWorld {
    volumes: Vec<Volume>,
    accel: WorldAccel,
}

impl CollisionWorld {
    /// Build the index. Volume indices in contacts refer to positions in `volumes`.
    ///
    /// An empty list is valid and yields a world that never reports contacts.
    pub fn build(volumes: Vec<Volume>) -> Self {
        let accel = broad::build_world_accel(&volumes);
        log::debug!(
            "collision world built: {} volumes ({} finite, {} planes)",
            volumes.len(),
            accel.len(),
            accel.plane_indices.len()
        );
        Self { volumes, accel }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    #[inline]
    pub fn volumes(&self) -> &[Volume] {
        &self.volumes
    }

    /// The deepest contact between `capsule` and any volume, if one touches.
    ///
    /// When several volumes share the greatest depth, the one with the lowest index wins.
    pub fn query_capsule(&self, capsule: &Capsule) -> Option<Contact> {
        self.deepest_contact(capsule, |_| true)
    }

    /// The deepest contact whose push-out normal has a Y component above `min_normal_y`.
    ///
    /// Unlike [`Self::query_capsule`], a deeper wall contact does not hide a shallow floor
    /// contact underneath it.
    pub fn floor_contact(&self, capsule: &Capsule, min_normal_y: f32) -> Option<Contact> {
        self.deepest_contact(capsule, |normal| normal.y > min_normal_y)
    }

    fn deepest_contact(
        &self,
        capsule: &Capsule,
        accept: impl Fn(&Vec3) -> bool,
    ) -> Option<Contact> {
        if self.volumes.is_empty() {
            return None;
        }

        let shape = narrow_phase::parry_capsule(capsule);
        let aabb = broad::capsule_aabb(capsule, BROAD_PHASE_MARGIN);

        let mut candidates = broad::query_candidates(&self.accel, &aabb);
        candidates.extend_from_slice(&self.accel.plane_indices);
        candidates.sort_unstable();

        let mut best: Option<Contact> = None;
        for idx in candidates {
            let volume = &self.volumes[idx];
            let Some((normal, depth)) =
                narrow_phase::contact_capsule_against_static(&shape, &volume.shape)
            else {
                continue;
            };
            if !accept(&normal) {
                continue;
            }
            if best.is_none_or(|b| depth > b.depth) {
                best = Some(Contact {
                    normal,
                    depth,
                    volume: idx,
                    tag: volume.tag,
                });
            }
        }
        best
    }

    /// True if `capsule` touches any volume.
    #[inline]
    pub fn intersects(&self, capsule: &Capsule) -> bool {
        self.query_capsule(capsule).is_some()
    }
}
