//! The five collections of the finance API.

use api_types::{
    EntityId, bill::BillFields, card::CardFields, expense::ExpenseFields, income::IncomeFields,
    installment::InstallmentFields,
};

use crate::{
    resource::{Entity, Resource, ViewKey},
    store::ResourceStore,
};

macro_rules! resource {
    ($(#[$meta:meta])* $name:ident, $fields:ty, $path:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
        pub struct $name;

        impl Resource for $name {
            type Fields = $fields;
            const PATH: &'static str = $path;
        }
    };
}

resource!(
    /// `/bills`, with the `unpaid` view.
    Bills, BillFields, "bills"
);
resource!(Expenses, ExpenseFields, "expenses");
resource!(
    /// `/incomes`, with the `recurring` view.
    Incomes, IncomeFields, "incomes"
);
resource!(Cards, CardFields, "cards");
resource!(
    /// `/installments`, with one `card/{id}` view per card.
    Installments, InstallmentFields, "installments"
);

pub fn unpaid_bills() -> ViewKey {
    ViewKey::new("unpaid")
}

pub fn recurring_incomes() -> ViewKey {
    ViewKey::new("recurring")
}

pub fn card_installments(card_id: &EntityId) -> ViewKey {
    ViewKey::new(format!("card/{card_id}"))
}

impl ResourceStore<Bills> {
    /// Last fetched `unpaid` view, empty until fetched.
    pub fn unpaid(&self) -> &[Entity<Bills>] {
        self.view(&unpaid_bills()).unwrap_or_default()
    }
}

impl ResourceStore<Incomes> {
    pub fn recurring(&self) -> &[Entity<Incomes>] {
        self.view(&recurring_incomes()).unwrap_or_default()
    }
}

impl ResourceStore<Installments> {
    pub fn for_card(&self, card_id: &EntityId) -> &[Entity<Installments>] {
        self.view(&card_installments(card_id)).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{item_path, view_path};

    #[test]
    fn paths_follow_rest_layout() {
        assert_eq!(Bills::PATH, "bills");
        assert_eq!(Expenses::PATH, "expenses");
        assert_eq!(Incomes::PATH, "incomes");
        assert_eq!(Cards::PATH, "cards");
        assert_eq!(item_path::<Cards>(&EntityId::from("4")), "cards/4");
        assert_eq!(view_path::<Bills>(&unpaid_bills()), "bills/unpaid");
        assert_eq!(view_path::<Incomes>(&recurring_incomes()), "incomes/recurring");
        assert_eq!(
            view_path::<Installments>(&card_installments(&EntityId::from("7"))),
            "installments/card/7"
        );
    }

    #[test]
    fn unfetched_views_are_empty() {
        assert!(ResourceStore::<Bills>::new().unpaid().is_empty());
        assert!(ResourceStore::<Incomes>::new().recurring().is_empty());
        assert!(
            ResourceStore::<Installments>::new()
                .for_card(&EntityId::from("1"))
                .is_empty()
        );
    }
}
