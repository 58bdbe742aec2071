use crate::model::board::Board;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRow {
    pub key: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub initials: String,
    pub color_index: usize,
}

/// Contacts sharing an initial letter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactGroup {
    pub letter: char,
    pub contacts: Vec<ContactRow>,
}

/// Group heading for a name: its uppercase first letter, `#` otherwise
fn group_letter(name: &str) -> char {
    match name.trim().chars().next() {
        Some(c) if c.is_alphabetic() => c.to_uppercase().next().unwrap_or(c),
        _ => '#',
    }
}

/// Contacts sorted by first name and grouped by initial letter
pub fn contact_list(board: &Board) -> Vec<ContactGroup> {
    let mut groups: Vec<ContactGroup> = Vec::new();
    for (pos, (key, contact)) in board.sorted_contacts().into_iter().enumerate() {
        let row = ContactRow {
            key: key.clone(),
            name: contact.name.clone(),
            email: contact.email.clone(),
            phone: contact.phonenumber.clone(),
            initials: contact.initials(),
            color_index: board.contact_color_index(key).unwrap_or(pos),
        };
        let letter = group_letter(&contact.name);
        match groups.last_mut() {
            Some(group) if group.letter == letter => group.contacts.push(row),
            _ => groups.push(ContactGroup {
                letter,
                contacts: vec![row],
            }),
        }
    }
    groups
}

/// Keys in list order, for cursor navigation
pub fn flat_keys(groups: &[ContactGroup]) -> Vec<&str> {
    groups
        .iter()
        .flat_map(|g| g.contacts.iter().map(|c| c.key.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::contact::Contact;

    #[test]
    fn grouped_by_first_letter_in_sorted_order() {
        let mut board = Board::new();
        board.insert_contact("1", Contact::new("bob Stone", "b@x", "1"));
        board.insert_contact("2", Contact::new("Anna Meier", "a@x", "2"));
        board.insert_contact("3", Contact::new("Ben Ode", "", ""));
        board.insert_contact("4", Contact::new("42 Club", "", ""));

        let groups = contact_list(&board);
        let letters: Vec<char> = groups.iter().map(|g| g.letter).collect();
        assert_eq!(letters, vec!['#', 'A', 'B']);
        let b_names: Vec<&str> = groups[2].contacts.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(b_names, vec!["Ben Ode", "bob Stone"]);
        assert_eq!(groups[1].contacts[0].initials, "AM");
        assert_eq!(groups[1].contacts[0].color_index, 1);
        assert_eq!(flat_keys(&groups), vec!["4", "2", "3", "1"]);
    }

    #[test]
    fn empty_board_has_no_groups() {
        assert!(contact_list(&Board::new()).is_empty());
    }
}
