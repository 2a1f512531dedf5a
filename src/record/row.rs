use std::fmt;

use super::error::{RecordError, RecordResult};
use super::{
    COLUMN_EMAIL_SIZE, COLUMN_USERNAME_SIZE, EMAIL_OFFSET, EMAIL_SIZE, ID_OFFSET, ID_SIZE,
    ROW_SIZE, USERNAME_OFFSET, USERNAME_SIZE,
};

/// A single row of the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    id: u32,
    username: String,
    email: String,
}

impl Row {
    /// Create a row, checking that both strings fit their fixed-width fields
    pub fn new(
        id: u32,
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> RecordResult<Self> {
        let username = username.into();
        let email = email.into();
        check_field("username", &username, COLUMN_USERNAME_SIZE)?;
        check_field("email", &email, COLUMN_EMAIL_SIZE)?;
        Ok(Self { id, username, email })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Serialize the row into the first ROW_SIZE bytes of `dest`.
    /// Format: [id: u32 LE] [username, NUL padded] [email, NUL padded]
    pub fn serialize(&self, dest: &mut [u8]) {
        let dest = &mut dest[..ROW_SIZE];
        dest[ID_OFFSET..ID_OFFSET + ID_SIZE].copy_from_slice(&self.id.to_le_bytes());
        write_fixed(
            &mut dest[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_SIZE],
            &self.username,
        );
        write_fixed(&mut dest[EMAIL_OFFSET..EMAIL_OFFSET + EMAIL_SIZE], &self.email);
    }

    /// Deserialize a row from the first ROW_SIZE bytes of `src`
    pub fn deserialize(src: &[u8]) -> Self {
        let src = &src[..ROW_SIZE];
        let mut id = [0u8; ID_SIZE];
        id.copy_from_slice(&src[ID_OFFSET..ID_OFFSET + ID_SIZE]);

        Self {
            id: u32::from_le_bytes(id),
            username: read_fixed(&src[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_SIZE]),
            email: read_fixed(&src[EMAIL_OFFSET..EMAIL_OFFSET + EMAIL_SIZE]),
        }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.id, self.username, self.email)
    }
}

fn check_field(field: &'static str, value: &str, max: usize) -> RecordResult<()> {
    if value.len() > max {
        return Err(RecordError::FieldTooLong {
            field,
            max,
            actual: value.len(),
        });
    }
    if value.contains('\0') {
        return Err(RecordError::InvalidField {
            field,
            reason: "contains a NUL byte",
        });
    }
    Ok(())
}

/// Copy a string into a fixed-width field and zero the remainder
fn write_fixed(field: &mut [u8], value: &str) {
    let bytes = value.as_bytes();
    field[..bytes.len()].copy_from_slice(bytes);
    field[bytes.len()..].fill(0);
}

/// Read a NUL-terminated string out of a fixed-width field
fn read_fixed(field: &[u8]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_creation() {
        let row = Row::new(1, "alice", "a@x.com").unwrap();
        assert_eq!(row.id(), 1);
        assert_eq!(row.username(), "alice");
        assert_eq!(row.email(), "a@x.com");
    }

    #[test]
    fn test_row_round_trip() {
        let rows = [
            Row::new(0, "", "").unwrap(),
            Row::new(42, "bob", "b@x.com").unwrap(),
            Row::new(u32::MAX, "ünïcødé", "ü@example.com").unwrap(),
            Row::new(
                7,
                "a".repeat(COLUMN_USERNAME_SIZE),
                "e".repeat(COLUMN_EMAIL_SIZE),
            )
            .unwrap(),
        ];

        for row in rows {
            let mut buffer = [0xFFu8; ROW_SIZE];
            row.serialize(&mut buffer);
            assert_eq!(Row::deserialize(&buffer), row);
        }
    }

    #[test]
    fn test_row_layout() {
        let row = Row::new(0x01020304, "bob", "b@x.com").unwrap();
        let mut buffer = [0xFFu8; ROW_SIZE + 8];
        row.serialize(&mut buffer);

        assert_eq!(&buffer[ID_OFFSET..ID_OFFSET + 4], &[4, 3, 2, 1]);
        assert_eq!(&buffer[USERNAME_OFFSET..USERNAME_OFFSET + 3], b"bob");
        assert!(
            buffer[USERNAME_OFFSET + 3..EMAIL_OFFSET]
                .iter()
                .all(|&b| b == 0)
        );
        assert_eq!(&buffer[EMAIL_OFFSET..EMAIL_OFFSET + 7], b"b@x.com");
        assert!(buffer[EMAIL_OFFSET + 7..ROW_SIZE].iter().all(|&b| b == 0));
        // Bytes past the slot are left alone
        assert!(buffer[ROW_SIZE..].iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn test_serialize_at_offset() {
        let row = Row::new(9, "carol", "c@x.com").unwrap();
        let mut page = vec![0u8; 3 * ROW_SIZE];
        row.serialize(&mut page[ROW_SIZE..]);

        assert!(page[..ROW_SIZE].iter().all(|&b| b == 0));
        assert_eq!(Row::deserialize(&page[ROW_SIZE..]), row);
    }

    #[test]
    fn test_field_too_long() {
        let result = Row::new(1, "a".repeat(COLUMN_USERNAME_SIZE + 1), "a@x.com");
        assert!(matches!(
            result,
            Err(RecordError::FieldTooLong {
                field: "username",
                ..
            })
        ));

        let result = Row::new(1, "alice", "a".repeat(COLUMN_EMAIL_SIZE + 1));
        assert!(matches!(
            result,
            Err(RecordError::FieldTooLong { field: "email", .. })
        ));
    }

    #[test]
    fn test_nul_rejected() {
        let result = Row::new(1, "al\0ice", "a@x.com");
        assert!(matches!(result, Err(RecordError::InvalidField { .. })));
    }

    #[test]
    fn test_display() {
        let row = Row::new(1, "alice", "a@x.com").unwrap();
        assert_eq!(row.to_string(), "(1, alice, a@x.com)");
    }
}
