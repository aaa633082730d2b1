//! Role membership store
//!
//! ADMIN holders may grant and revoke any role, ADMIN included. Nothing stops
//! the last ADMIN from revoking itself; the registry is then frozen.

use std::collections::{BTreeSet, HashMap};

use bridge_core::{Address, BridgeError, Role};

#[derive(Debug, Clone, Default)]
pub struct AccessControl {
    members: HashMap<Role, BTreeSet<Address>>,
}

impl AccessControl {
    /// Empty store; nobody can administer it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose only member is `admin` holding ADMIN
    pub fn with_admin(admin: Address) -> Self {
        Self::with_roles(admin, &[Role::Admin])
    }

    /// Store whose only member is `account`, holding every role in `roles`
    pub fn with_roles(account: Address, roles: &[Role]) -> Self {
        let mut access = Self::new();
        for &role in roles {
            access.insert(role, account);
        }
        access
    }

    pub fn has_role(&self, role: Role, account: &Address) -> bool {
        self.members
            .get(&role)
            .is_some_and(|set| set.contains(account))
    }

    /// Fail with `Unauthorized` unless `account` holds `role`
    pub fn require_role(&self, role: Role, account: &Address) -> Result<(), BridgeError> {
        if self.has_role(role, account) {
            Ok(())
        } else {
            Err(BridgeError::Unauthorized {
                account: *account,
                role,
            })
        }
    }

    /// Members of `role`, sorted
    pub fn members(&self, role: Role) -> Vec<Address> {
        self.members
            .get(&role)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Grant `role` to `account`. Returns whether membership changed.
    pub fn grant_role(
        &mut self,
        caller: &Address,
        role: Role,
        account: Address,
    ) -> Result<bool, BridgeError> {
        self.require_role(Role::Admin, caller)?;
        let changed = self.insert(role, account);
        if changed {
            tracing::info!(%role, %account, granted_by = %caller, "Role granted");
        }
        Ok(changed)
    }

    /// Revoke `role` from `account`. Returns whether membership changed.
    pub fn revoke_role(
        &mut self,
        caller: &Address,
        role: Role,
        account: &Address,
    ) -> Result<bool, BridgeError> {
        self.require_role(Role::Admin, caller)?;
        Ok(self.remove(role, account, caller))
    }

    /// Drop a role the caller holds. No-op if it does not hold it.
    pub fn renounce_role(&mut self, caller: &Address, role: Role) -> bool {
        self.remove(role, caller, caller)
    }

    fn insert(&mut self, role: Role, account: Address) -> bool {
        self.members.entry(role).or_default().insert(account)
    }

    fn remove(&mut self, role: Role, account: &Address, by: &Address) -> bool {
        let changed = self
            .members
            .get_mut(&role)
            .is_some_and(|set| set.remove(account));

        if changed {
            tracing::info!(%role, %account, revoked_by = %by, "Role revoked");
            if role == Role::Admin && self.members(Role::Admin).is_empty() {
                tracing::warn!("Last ADMIN removed; administration is now locked");
            }
        }
        changed
    }
}
