//! Authorization profiles and the permissions they grant

/// A module-level permission carried in the access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    Read,
    Attendance,
    ManageVolunteer,
    Notebook,
}

impl Permission {
    pub const ALL: [Permission; 4] = [
        Permission::Read,
        Permission::Attendance,
        Permission::ManageVolunteer,
        Permission::Notebook,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "readPermission",
            Self::Attendance => "attendanceModulePermission",
            Self::ManageVolunteer => "manageVolunteerModulePermission",
            Self::Notebook => "notebookModulePermission",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == s)
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named set of permissions assigned to volunteers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionProfile {
    pub name: String,
    pub read: bool,
    pub attendance_module: bool,
    pub manage_volunteer_module: bool,
    pub notebook_module: bool,
}

impl PermissionProfile {
    /// Profile granting every permission.
    pub fn full(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            read: true,
            attendance_module: true,
            manage_volunteer_module: true,
            notebook_module: true,
        }
    }

    pub fn allows(&self, permission: Permission) -> bool {
        match permission {
            Permission::Read => self.read,
            Permission::Attendance => self.attendance_module,
            Permission::ManageVolunteer => self.manage_volunteer_module,
            Permission::Notebook => self.notebook_module,
        }
    }

    pub fn granted(&self) -> Vec<Permission> {
        Permission::ALL
            .into_iter()
            .filter(|p| self.allows(*p))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_names_round_trip() {
        for p in Permission::ALL {
            assert_eq!(Permission::parse(p.as_str()), Some(p));
        }
        assert_eq!(Permission::parse("adminPermission"), None);
    }

    #[test]
    fn granted_lists_enabled_flags_only() {
        let profile = PermissionProfile {
            name: "coordinator".into(),
            read: true,
            attendance_module: true,
            manage_volunteer_module: false,
            notebook_module: false,
        };
        assert_eq!(
            profile.granted(),
            vec![Permission::Read, Permission::Attendance]
        );
        assert!(!profile.allows(Permission::Notebook));
    }

    #[test]
    fn full_profile_allows_everything() {
        let profile = PermissionProfile::full("admin");
        assert!(Permission::ALL.iter().all(|p| profile.allows(*p)));
    }
}
