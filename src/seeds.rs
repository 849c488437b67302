//! Built-in lesson catalog. Guarantees the service is useful even without config or upstream.

use crate::domain::{Lesson, ResourceLink};

const USCIS: &str = "https://www.uscis.gov/";
const POLICY_MANUAL: &str = "https://www.uscis.gov/policy-manual";
const STATE_VISAS: &str = "https://travel.state.gov/content/travel/en/us-visas.html";

macro_rules! lesson {
  (
    $id:expr, $number:expr, $title:expr,
    objectives: [$($objective:expr),* $(,)?],
    summary: $summary:expr,
    points: [$($point:expr),* $(,)?],
    tags: [$($tag:expr),* $(,)?],
    resources: [$(($label:expr, $url:expr)),* $(,)?] $(,)?
  ) => {
    Lesson {
      id: $id.to_string(),
      number: $number,
      title: $title.to_string(),
      objectives: vec![$($objective.to_string()),*],
      summary: $summary.to_string(),
      teaching_points: vec![$($point.to_string()),*],
      tags: vec![$($tag.to_string()),*],
      resources: vec![$(ResourceLink { label: $label.to_string(), url: $url.to_string() }),*],
    }
  };
}

/// The 19-chapter immigration classification course, in teaching order.
pub fn seed_lessons() -> Vec<Lesson> {
  vec![
    lesson!(
      "classification-basics", 1, "Immigrant and Nonimmigrant Classifications",
      objectives: ["Distinguish immigrant intent from temporary stay"],
      summary: "How U.S. law sorts foreign nationals into temporary visa classes and permanent residence paths.",
      points: [
        "Nonimmigrant classes authorize a temporary stay for a specific purpose",
        "Immigrant classes lead to lawful permanent residence",
        "Most nonimmigrants are presumed to have immigrant intent until they show otherwise",
      ],
      tags: ["overview"],
      resources: [("USCIS Policy Manual", POLICY_MANUAL)],
    ),
    lesson!(
      "b1-b2", 2, "B-1/B-2 Visitors for Business and Pleasure",
      objectives: ["Identify activities permitted to business and tourist visitors"],
      summary: "Visitor visa rules for short business trips, tourism and medical treatment.",
      points: [
        "Visitors may attend meetings but may not perform productive work",
        "Admission is usually granted for up to six months",
        "Visa Waiver Program travelers use ESTA instead of a visa",
      ],
      tags: ["nonimmigrant", "visitor"],
      resources: [("U.S. Visas", STATE_VISAS)],
    ),
    lesson!(
      "f1", 3, "F-1 Academic Students",
      objectives: ["Explain the role of Form I-20 in student status"],
      summary: "Student visa status for full-time academic study and related practical training.",
      points: [
        "A SEVP-certified school issues Form I-20",
        "Students must maintain a full course of study",
        "Optional Practical Training allows temporary employment in the field of study",
      ],
      tags: ["nonimmigrant", "student"],
      resources: [("U.S. Visas", STATE_VISAS)],
    ),
    lesson!(
      "j1", 4, "J-1 Exchange Visitors",
      objectives: ["Recognize when the two-year home residency requirement applies"],
      summary: "Exchange visitor programs designated by the Department of State.",
      points: [
        "A program sponsor issues Form DS-2019",
        "Some exchange visitors must return home for two years before certain later visas",
        "Waivers of the home residency requirement are available on limited grounds",
      ],
      tags: ["nonimmigrant", "exchange"],
      resources: [],
    ),
    lesson!(
      "h1b", 5, "H-1B Specialty Occupations",
      objectives: ["Define a specialty occupation"],
      summary: "Employer-sponsored temporary work visa for roles requiring a bachelor's degree or higher.",
      points: [
        "The U.S. employer files the petition on Form I-129",
        "A certified Labor Condition Application is required",
        "Total H-1B time is generally limited to six years",
        "Most new petitions are subject to an annual numerical cap",
      ],
      tags: ["nonimmigrant", "employment"],
      resources: [("USCIS", USCIS)],
    ),
    lesson!(
      "l1", 6, "L-1 Intracompany Transferees",
      objectives: ["Describe the qualifying relationship between foreign and U.S. entities"],
      summary: "Transfers of managers, executives and specialized knowledge staff within one company group.",
      points: [
        "One continuous year of employment abroad within the prior three years is required",
        "L-1A covers managers and executives",
        "L-1B covers employees with specialized knowledge",
      ],
      tags: ["nonimmigrant", "employment"],
      resources: [("USCIS", USCIS)],
    ),
    lesson!(
      "o1", 7, "O-1 Extraordinary Ability",
      objectives: ["List the evidence types used to show sustained acclaim"],
      summary: "Temporary visa for individuals with extraordinary ability or achievement.",
      points: [
        "O-1A covers sciences, education, business and athletics",
        "O-1B covers the arts and motion picture or television work",
        "An advisory opinion from a peer group is usually required",
      ],
      tags: ["nonimmigrant", "employment"],
      resources: [],
    ),
    lesson!(
      "e1-e2", 8, "E-1/E-2 Treaty Traders and Investors",
      objectives: ["Explain the treaty country requirement"],
      summary: "Treaty-based visa classes for substantial trade or investment.",
      points: [
        "The applicant must be a national of a treaty country",
        "E-2 investments must be substantial and at risk",
        "E visas can be renewed indefinitely while the enterprise qualifies",
      ],
      tags: ["nonimmigrant", "investment"],
      resources: [("U.S. Visas", STATE_VISAS)],
    ),
    lesson!(
      "tn", 9, "TN USMCA Professionals",
      objectives: ["Identify who may request TN status at the border"],
      summary: "Professional work status for Canadian and Mexican citizens under USMCA.",
      points: [
        "Only listed professions qualify",
        "Canadians may apply directly at a port of entry",
        "Mexican citizens need a TN visa from a consulate",
      ],
      tags: ["nonimmigrant", "employment"],
      resources: [],
    ),
    lesson!(
      "eb1", 10, "EB-1 Priority Workers",
      objectives: ["Compare the three EB-1 subcategories"],
      summary: "First-preference employment-based immigrant visa for top talent.",
      points: [
        "EB-1A extraordinary ability applicants may self-petition",
        "EB-1B requires a permanent research or teaching offer",
        "EB-1C covers multinational managers and executives",
      ],
      tags: ["immigrant", "employment"],
      resources: [("USCIS Policy Manual", POLICY_MANUAL)],
    ),
    lesson!(
      "eb2", 11, "EB-2 Advanced Degrees and National Interest Waivers",
      objectives: ["Explain when labor certification can be waived"],
      summary: "Second-preference category for advanced degree professionals and exceptional ability.",
      points: [
        "A master's degree or a bachelor's plus five years of progressive experience qualifies",
        "A national interest waiver removes the job offer requirement",
        "Labor certification is otherwise required",
      ],
      tags: ["immigrant", "employment"],
      resources: [("USCIS Policy Manual", POLICY_MANUAL)],
    ),
    lesson!(
      "eb3", 12, "EB-3 Skilled Workers and Professionals",
      objectives: ["Describe the PERM labor certification step"],
      summary: "Third-preference category for skilled workers, professionals and other workers.",
      points: [
        "Skilled workers need at least two years of training or experience",
        "The employer must test the U.S. labor market",
        "Form I-140 follows an approved labor certification",
      ],
      tags: ["immigrant", "employment"],
      resources: [],
    ),
    lesson!(
      "eb5", 13, "EB-5 Immigrant Investors",
      objectives: ["State the job creation requirement"],
      summary: "Permanent residence through a qualifying investment in a new commercial enterprise.",
      points: [
        "Each investment must create at least ten full-time jobs",
        "Reduced investment amounts apply in targeted employment areas",
        "Investors first receive conditional residence",
      ],
      tags: ["immigrant", "investment"],
      resources: [("USCIS", USCIS)],
    ),
    lesson!(
      "immediate-relatives", 14, "Immediate Relatives of U.S. Citizens",
      objectives: ["Identify who counts as an immediate relative"],
      summary: "Family-based immigration without annual numerical limits.",
      points: [
        "Spouses of U.S. citizens are immediate relatives",
        "Unmarried children under 21 are immediate relatives",
        "Parents qualify when the citizen petitioner is at least 21",
      ],
      tags: ["immigrant", "family"],
      resources: [("USCIS", USCIS)],
    ),
    lesson!(
      "family-preference", 15, "Family Preference Categories",
      objectives: ["Order the four family preference categories"],
      summary: "Numerically limited family categories and the visa bulletin.",
      points: [
        "F2A covers spouses and minor children of permanent residents",
        "F4 covers siblings of adult U.S. citizens",
        "Priority dates control when a visa becomes available",
      ],
      tags: ["immigrant", "family"],
      resources: [("U.S. Visas", STATE_VISAS)],
    ),
    lesson!(
      "asylum-refugee", 16, "Asylum and Refugee Status",
      objectives: ["Name the five protected grounds"],
      summary: "Humanitarian protection for people who fear persecution.",
      points: [
        "Persecution must be on account of race, religion, nationality, political opinion or social group",
        "Asylum is generally requested within one year of arrival",
        "Refugees are processed from outside the United States",
      ],
      tags: ["humanitarian"],
      resources: [],
    ),
    lesson!(
      "adjustment", 17, "Adjustment of Status",
      objectives: ["Contrast adjustment of status with consular processing"],
      summary: "Becoming a permanent resident from inside the United States using Form I-485.",
      points: [
        "Adjustment requires a lawful admission or parole in most cases",
        "Applicants may request work and travel permission while pending",
        "Consular processing completes the case abroad instead",
      ],
      tags: ["procedure"],
      resources: [("USCIS Policy Manual", POLICY_MANUAL)],
    ),
    lesson!(
      "conditional-residence", 18, "Conditional Residence",
      objectives: ["Explain how conditions are removed"],
      summary: "Two-year conditional green cards for recent marriages and investors.",
      points: [
        "Marriage-based conditional residents file Form I-751",
        "Investors remove conditions with Form I-829",
        "Petitions are filed in the 90 days before the card expires",
      ],
      tags: ["procedure"],
      resources: [],
    ),
    lesson!(
      "naturalization", 19, "Naturalization",
      objectives: ["List the core naturalization eligibility requirements"],
      summary: "Becoming a U.S. citizen after permanent residence.",
      points: [
        "Five years of permanent residence is the general requirement",
        "Spouses of U.S. citizens may qualify after three years",
        "Applicants must pass English and civics tests",
      ],
      tags: ["citizenship"],
      resources: [("USCIS", USCIS)],
    ),
  ]
}
