use dto::group::GroupDto;

/// Figures shown in the stat cards above the group list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupStats {
    pub active_groups: usize,
    pub total_students: u32,
}

impl GroupStats {
    pub fn from_groups(groups: &[GroupDto]) -> Self {
        Self {
            active_groups: groups.len(),
            total_students: groups.iter().map(|group| group.student_count).sum(),
        }
    }

    /// `(value, label)` pairs in display order.
    pub fn cards(&self) -> [(String, &'static str); 2] {
        [
            (self.active_groups.to_string(), "Grupos Activos"),
            (self.total_students.to_string(), "Total Estudiantes"),
        ]
    }
}
